#[cfg(test)]
mod sweep_tests {
    use sfscale::config::SweepConfig;
    use sfscale::oracle::{FeasibilityOracle, FeasibilityResult, OracleError, SearchRequest, ThresholdOracle};
    use sfscale::sweep::{self, search_radix, SweepError};

    fn config(min_radix: u64, max_radix: u64) -> SweepConfig {
        SweepConfig::new("slimflysearch", min_radix, max_radix, 0.5)
    }

    /// Every threshold below the ceiling is recovered exactly
    #[test]
    fn test_search_recovers_every_threshold() {
        for radix in 2..=8u64 {
            let ceiling = radix.pow(3);
            for threshold in 2..ceiling {
                let mut oracle = ThresholdOracle::new(threshold);
                let record = search_radix(&mut oracle, &config(radix, radix), radix).unwrap();
                assert_eq!(
                    record.terminals, threshold,
                    "radix {} threshold {}",
                    radix, threshold
                );
            }
        }
    }

    /// Radix 10 has a ceiling of 1000 and needs at most 12 calls
    #[test]
    fn test_call_count_is_logarithmic() {
        for threshold in 2..1000u64 {
            let mut oracle = ThresholdOracle::new(threshold);
            search_radix(&mut oracle, &config(10, 10), 10).unwrap();
            assert!(
                oracle.calls().len() <= 12,
                "threshold {} took {} calls",
                threshold,
                oracle.calls().len()
            );
        }
    }

    /// A feasible ceiling aborts the run without a record for that radix
    #[test]
    fn test_feasible_ceiling_aborts_sweep() {
        let config = config(3, 5);
        let oracle = ThresholdOracle::new(20).with_threshold(3, 1_000);
        let mut sweep = sweep::run(&config, oracle);

        let first = sweep.next().unwrap();
        assert!(matches!(first, Err(SweepError::CeilingReachable { radix: 3, ceiling: 27 })));
        assert!(sweep.next().is_none());

        let oracle = sweep.into_oracle();
        assert_eq!(oracle.calls().len(), 1);
        assert_eq!(oracle.calls_for(4), 0);
    }

    /// Earlier records stand when a later radix fails
    #[test]
    fn test_records_before_failure_are_kept() {
        let config = config(3, 6);
        let oracle = ThresholdOracle::new(20).with_threshold(5, 125);
        let results: Vec<_> = sweep::run(&config, oracle).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().radix, 3);
        assert_eq!(results[1].as_ref().unwrap().radix, 4);
        assert!(results[2].is_err());
    }

    /// Requests above the cap are never issued
    #[test]
    fn test_radix_cap_enforced() {
        let config = config(48, 100);
        let mut sweep = sweep::run(&config, ThresholdOracle::new(100));
        let radixes: Vec<u64> = sweep.by_ref().map(|r| r.unwrap().radix).collect();
        assert_eq!(radixes, vec![48, 49, 50, 51]);

        let oracle = sweep.into_oracle();
        assert!(oracle.calls().iter().all(|c| c.radix <= 51));
    }

    /// Single-radix scenario with a threshold of 12
    #[test]
    fn test_end_to_end_single_radix() {
        let config = config(3, 3);
        let records: Vec<_> = sweep::run(&config, ThresholdOracle::new(12))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = records[0];
        let (routers, channels) = ThresholdOracle::configuration(3, 12);
        assert_eq!(record.radix, 3);
        assert_eq!(record.terminals, 12);
        assert_eq!(record.routers, routers);
        assert_eq!(record.channels, channels);
        assert_eq!(record.terminals_per_router, 12.0 / routers);
        assert_eq!(record.channels_per_terminal, channels / 12.0);
    }

    /// Each radix uses only its own calls and fresh bounds
    #[test]
    fn test_radixes_are_independent() {
        let config = config(3, 6);
        let combined = ThresholdOracle::new(7)
            .with_threshold(4, 50)
            .with_threshold(6, 3);
        let swept: Vec<_> = sweep::run(&config, combined)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        for record in &swept {
            let radix = record.radix;
            let mut alone = ThresholdOracle::new(7)
                .with_threshold(4, 50)
                .with_threshold(6, 3);
            let single = search_radix(&mut alone, &config, radix).unwrap();
            assert_eq!(*record, single);
        }
        assert_eq!(
            swept.iter().map(|r| r.terminals).collect::<Vec<_>>(),
            vec![7, 50, 7, 3]
        );
    }

    /// A borrowed oracle can serve consecutive sweeps and keeps its call log
    #[test]
    fn test_borrowed_oracle_across_sweeps() {
        let mut oracle = ThresholdOracle::new(12).with_threshold(5, 30);

        let low = config(3, 4);
        let first: Vec<_> = sweep::run(&low, &mut oracle)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let calls_after_first = oracle.calls().len();

        let high = config(5, 5);
        let second: Vec<_> = sweep::run(&high, &mut oracle)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(first.iter().map(|r| r.terminals).collect::<Vec<_>>(), vec![12, 12]);
        assert_eq!(second[0].terminals, 30);
        assert!(oracle.calls().len() > calls_after_first);
        assert_eq!(oracle.calls_for(5), oracle.calls().len() - calls_after_first);
    }

    /// Records are produced lazily, one radix at a time
    #[test]
    fn test_sweep_is_lazy() {
        let config = config(3, 10);
        let mut sweep = sweep::run(&config, ThresholdOracle::new(5));
        let first = sweep.next().unwrap().unwrap();
        assert_eq!(first.radix, 3);

        let oracle = sweep.into_oracle();
        assert!(oracle.calls().iter().all(|c| c.radix == 3));
    }

    /// Oracle that fails on its n-th call
    struct FailingOracle {
        inner: ThresholdOracle,
        fail_at: usize,
    }

    impl FeasibilityOracle for FailingOracle {
        fn evaluate(&mut self, request: &SearchRequest) -> Result<FeasibilityResult, OracleError> {
            if self.inner.calls().len() == self.fail_at {
                return Err(OracleError::Failed {
                    program: "slimflysearch".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                });
            }
            self.inner.evaluate(request)
        }
    }

    /// Oracle failures propagate unchanged and stop the sweep
    #[test]
    fn test_oracle_failure_is_fatal() {
        let config = config(3, 4);
        let oracle = FailingOracle {
            inner: ThresholdOracle::new(10),
            fail_at: 3,
        };
        let results: Vec<_> = sweep::run(&config, oracle).collect();

        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(SweepError::Oracle { radix: 3, source, .. }) => {
                assert!(matches!(source, OracleError::Failed { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// The spot-check runs after convergence when enabled
    #[test]
    fn test_spot_check_adds_probes() {
        let mut config = config(5, 5);
        let mut plain = ThresholdOracle::new(40);
        search_radix(&mut plain, &config, 5).unwrap();

        config.verify_points = 3;
        let mut checked = ThresholdOracle::new(40);
        let record = search_radix(&mut checked, &config, 5).unwrap();

        assert_eq!(record.terminals, 40);
        assert_eq!(checked.calls().len(), plain.calls().len() + 3);
    }
}
