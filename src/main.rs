/*!
 * heapchurn - Main Entry Point
 *
 * Runs the allocation workload under one or both lifecycle strategies and
 * prints per-iteration readings plus the final statistics.
 */

use anyhow::{Context, Result};
use heapchurn::{Simulation, Strategy, WorkloadConfig, WorkloadStats};
use log::info;
use std::str::FromStr;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config_from_env()?;
    let seed: Option<u64> = env_parse("HEAPCHURN_SEED")?;
    let json = env_flag("HEAPCHURN_JSON");

    for strategy in strategies_from_env()? {
        run_strategy(config, strategy, seed, json)?;
    }

    Ok(())
}

fn run_strategy(
    config: WorkloadConfig,
    strategy: Strategy,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    info!(
        "starting {} run: {} iterations of {} allocations",
        strategy, config.iterations, config.batch_size
    );

    let mut sim = match seed {
        Some(seed) => Simulation::with_seed(config, strategy, seed)?,
        None => Simulation::new(config, strategy)?,
    };

    let started = Instant::now();
    for iteration in 1..=config.iterations {
        let report = sim.run_iteration(iteration)?;
        println!("=== Iteration {} ({}) ===", report.iteration, strategy);
        println!("Current memory usage: {} bytes", report.live_bytes);
        println!("Peak memory used so far: {} bytes", report.peak_bytes);
        if let Some(fragments) = report.fragments {
            println!("Fragments: {}", fragments);
        }
        println!("Memory after reclamation: {} bytes", report.live_after_reclaim);
    }
    let elapsed = started.elapsed().as_secs_f64();

    // statistics are read before the shutdown sweep so blocks the strategy
    // never released still show up as leaked bytes
    let stats = sim.final_statistics();
    print_summary(strategy, &stats, elapsed);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("serializing statistics")?
        );
    }

    let released = sim.shutdown();
    info!("{} run complete, shutdown released {} bytes", strategy, released);
    Ok(())
}

fn print_summary(strategy: Strategy, stats: &WorkloadStats, elapsed_secs: f64) {
    println!("=== Memory usage statistics ({}) ===", strategy);
    println!("Total memory allocated: {} bytes", stats.total_allocated);
    println!("Total memory freed: {} bytes", stats.total_freed);
    println!("Peak memory used: {} bytes", stats.peak_live);
    println!("Memory leak: {} bytes", stats.leaked_bytes);
    println!("Total fragments: {}", stats.total_fragments);
    println!(
        "Average fragment size: {:.2} bytes",
        stats.average_fragment_size
    );
    println!("Time elapsed: {:.5} seconds", elapsed_secs);
}

fn config_from_env() -> Result<WorkloadConfig> {
    let mut config = WorkloadConfig::default();
    if let Some(batch_size) = env_parse("HEAPCHURN_BATCH_SIZE")? {
        config.batch_size = batch_size;
    }
    if let Some(max_block_size) = env_parse("HEAPCHURN_MAX_BLOCK_SIZE")? {
        config.max_block_size = max_block_size;
    }
    if let Some(iterations) = env_parse("HEAPCHURN_ITERATIONS")? {
        config.iterations = iterations;
    }
    if let Some(frequency) = env_parse("HEAPCHURN_FREQUENCY")? {
        config.long_lived_frequency = frequency;
    }
    if let Some(lifetime) = env_parse("HEAPCHURN_LIFETIME")? {
        config.long_lived_lifetime = lifetime;
    }
    Ok(config)
}

fn strategies_from_env() -> Result<Vec<Strategy>> {
    match std::env::var("HEAPCHURN_STRATEGY") {
        Ok(value) if value == "both" => Ok(vec![Strategy::TrackedList, Strategy::FixedSlot]),
        Ok(value) => Ok(vec![Strategy::from_str(&value)?]),
        Err(_) => Ok(vec![Strategy::TrackedList, Strategy::FixedSlot]),
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => {
            let parsed = value
                .parse::<T>()
                .with_context(|| format!("parsing {}={:?}", key, value))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false)
}
