/*!
 * Property Tests
 * Accounting invariants checked over randomized configurations
 */

use heapchurn::{Simulation, WorkloadConfig};
use proptest::prelude::*;

fn arb_strategy() -> impl Strategy<Value = heapchurn::Strategy> {
    prop_oneof![
        Just(heapchurn::Strategy::TrackedList),
        Just(heapchurn::Strategy::FixedSlot),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn conservation_holds_throughout_any_run(
        strategy in arb_strategy(),
        batch_size in 1usize..200,
        max_block_size in 1usize..512,
        iterations in 1u32..5,
        long_lived_frequency in 1usize..50,
        long_lived_lifetime in 1u32..6,
        seed in any::<u64>(),
    ) {
        let config = WorkloadConfig {
            batch_size,
            max_block_size,
            iterations,
            long_lived_frequency,
            long_lived_lifetime,
        };
        let mut sim = Simulation::with_seed(config, strategy, seed).unwrap();

        let mut last_peak = 0;
        for iteration in 1..=iterations {
            let report = sim.run_iteration(iteration).unwrap();

            prop_assert!(report.peak_bytes >= last_peak);
            prop_assert!(report.peak_bytes >= report.live_bytes);
            prop_assert!(report.live_bytes >= report.live_after_reclaim);
            last_peak = report.peak_bytes;

            let stats = sim.final_statistics();
            prop_assert!(stats.total_allocated >= stats.total_freed);
        }

        sim.shutdown();
        let stats = sim.final_statistics();
        prop_assert_eq!(stats.total_allocated, stats.total_freed);
        prop_assert_eq!(stats.leaked_bytes, 0);
        prop_assert_eq!(stats.live_bytes, 0);
    }

    #[test]
    fn fragment_counts_follow_the_classification_rule(
        batch_size in 1usize..300,
        long_lived_frequency in 1usize..40,
        seed in any::<u64>(),
    ) {
        let config = WorkloadConfig {
            batch_size,
            max_block_size: 64,
            iterations: 1,
            long_lived_frequency,
            long_lived_lifetime: 3,
        };

        let mut list =
            Simulation::with_seed(config, heapchurn::Strategy::TrackedList, seed).unwrap();
        let report = list.run_iteration(1).unwrap();
        let long_lived = batch_size.div_ceil(long_lived_frequency);
        prop_assert_eq!(report.fragments, Some(batch_size - long_lived));

        let mut slots =
            Simulation::with_seed(config, heapchurn::Strategy::FixedSlot, seed).unwrap();
        let report = slots.run_iteration(1).unwrap();
        prop_assert_eq!(report.fragments, None);
    }
}
