use super::laser::{LaserReport, LaserTask};
use super::traits::ReportDestination;
use crate::domain::{ExecutionMode, InputPowerSet, LaserConfig, SatinError, SatinResult};
use std::collections::HashSet;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSummary {
    pub mode: ExecutionMode,
    /// One report per laser, in laser source order regardless of mode.
    pub reports: Vec<LaserReport>,
    /// Wall-clock time from dispatch until the last report came back.
    pub elapsed: Duration,
}

impl DispatchSummary {
    pub fn laser_count(&self) -> usize {
        self.reports.len()
    }

    pub fn row_count(&self) -> usize {
        self.reports.iter().map(|report| report.rows.len()).sum()
    }
}

/// Runs one [`LaserTask`] per laser.
///
/// In concurrent mode every laser gets its own native thread; the worker count
/// follows the laser count, not the core count. The first failure reported by
/// any worker is returned at once. Workers still running at that point are
/// detached and finish in the background, so their reports may still appear.
///
/// Two lasers may not share an output destination.
pub fn run_all(
    lasers: &[LaserConfig],
    input_powers: &InputPowerSet,
    destination: Arc<dyn ReportDestination>,
    mode: ExecutionMode,
) -> SatinResult<DispatchSummary> {
    let clock = Instant::now();
    info!(
        lasers = lasers.len(),
        input_powers = input_powers.len(),
        %mode,
        "dispatching laser tasks"
    );

    let reports = ensure_distinct_destinations(lasers).and_then(|()| match mode {
        ExecutionMode::Concurrent => run_concurrently(lasers, input_powers.as_slice(), destination),
        ExecutionMode::Sequential => {
            run_sequentially(lasers, input_powers.as_slice(), destination.as_ref())
        }
    });

    let elapsed = clock.elapsed();
    match reports {
        Ok(reports) => {
            info!(
                lasers = reports.len(),
                elapsed_secs = elapsed.as_secs_f64(),
                "all laser tasks completed"
            );
            Ok(DispatchSummary {
                mode,
                reports,
                elapsed,
            })
        }
        Err(failure) => {
            error!(code = failure.code(), "batch failed: {}", failure.message());
            Err(failure)
        }
    }
}

fn ensure_distinct_destinations(lasers: &[LaserConfig]) -> SatinResult<()> {
    let mut seen = HashSet::with_capacity(lasers.len());
    for laser in lasers {
        if !seen.insert(laser.output_destination.as_str()) {
            return Err(SatinError::input_validation(
                "INPUT.LASER_DUPLICATE",
                format!(
                    "destination '{}' is used by more than one laser",
                    laser.output_destination
                ),
            ));
        }
    }
    Ok(())
}

fn run_sequentially(
    lasers: &[LaserConfig],
    input_powers: &[i32],
    destination: &dyn ReportDestination,
) -> SatinResult<Vec<LaserReport>> {
    lasers
        .iter()
        .map(|laser| LaserTask::new(laser, input_powers).run(destination))
        .collect()
}

fn run_concurrently(
    lasers: &[LaserConfig],
    input_powers: &[i32],
    destination: Arc<dyn ReportDestination>,
) -> SatinResult<Vec<LaserReport>> {
    let input_powers: Arc<[i32]> = Arc::from(input_powers);
    let (sender, receiver) = mpsc::channel();

    for (index, laser) in lasers.iter().enumerate() {
        let laser = laser.clone();
        let input_powers = Arc::clone(&input_powers);
        let destination = Arc::clone(&destination);
        let sender = sender.clone();
        let _detached = thread::Builder::new()
            .name(format!("laser-{index}"))
            .spawn(move || {
                let outcome = LaserTask::new(&laser, &input_powers).run(destination.as_ref());
                // The receiver is gone once an earlier failure ended the batch.
                let _ = sender.send((index, outcome));
            })
            .map_err(|source| {
                SatinError::internal(
                    "RUN.WORKER_LAUNCH",
                    format!(
                        "failed to launch worker for '{}': {}",
                        lasers[index].output_destination, source
                    ),
                )
            })?;
    }
    drop(sender);

    let mut reports: Vec<Option<LaserReport>> = vec![None; lasers.len()];
    for _ in 0..lasers.len() {
        match receiver.recv() {
            Ok((index, Ok(report))) => reports[index] = Some(report),
            Ok((_, Err(failure))) => return Err(failure),
            // Every sender is dropped but a slot is still empty: that worker
            // unwound without reporting.
            Err(_) => return Err(worker_panic(lasers, &reports)),
        }
    }

    Ok(reports.into_iter().flatten().collect())
}

fn worker_panic(lasers: &[LaserConfig], reports: &[Option<LaserReport>]) -> SatinError {
    let destination = reports
        .iter()
        .position(Option::is_none)
        .map_or("<unknown>", |index| lasers[index].output_destination.as_str());
    SatinError::internal(
        "RUN.WORKER_PANIC",
        format!("worker for '{destination}' panicked"),
    )
}

#[cfg(test)]
mod tests {
    use super::run_all;
    use crate::domain::{
        ExecutionMode, InputPowerSet, LaserConfig, SatinError, SatinErrorCategory, SatinResult,
    };
    use crate::modules::traits::{ReportDestination, ReportWriter};
    use std::io;
    use std::sync::{Arc, Mutex, mpsc};
    use std::time::{Duration, Instant};

    struct DiscardDestination;

    impl ReportDestination for DiscardDestination {
        fn open(&self, _laser: &LaserConfig) -> SatinResult<ReportWriter> {
            Ok(Box::new(io::sink()))
        }
    }

    /// Refuses any destination whose name starts with `bad`.
    struct SelectiveDestination;

    impl ReportDestination for SelectiveDestination {
        fn open(&self, laser: &LaserConfig) -> SatinResult<ReportWriter> {
            if laser.output_destination.starts_with("bad") {
                return Err(SatinError::io_system(
                    "IO.REPORT_OPEN",
                    format!("cannot open '{}'", laser.output_destination),
                ));
            }
            Ok(Box::new(io::sink()))
        }
    }

    /// Refuses `bad*` destinations at once and holds every other laser until
    /// the gate is released (or 30 s pass).
    struct GatedDestination {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl ReportDestination for GatedDestination {
        fn open(&self, laser: &LaserConfig) -> SatinResult<ReportWriter> {
            if laser.output_destination.starts_with("bad") {
                return Err(SatinError::io_system(
                    "IO.REPORT_OPEN",
                    format!("cannot open '{}'", laser.output_destination),
                ));
            }
            let gate = self.gate.lock().expect("gate lock should not be poisoned");
            let _ = gate.recv_timeout(Duration::from_secs(30));
            Ok(Box::new(io::sink()))
        }
    }

    fn lasers() -> Vec<LaserConfig> {
        vec![
            LaserConfig::new("md1.out", 12.5, 120, "MD"),
            LaserConfig::new("pi1.out", 6.0, 90, "PI"),
            LaserConfig::new("md2.out", 0.0, 60, "MD"),
        ]
    }

    #[test]
    fn concurrent_reports_keep_laser_order() {
        let powers = InputPowerSet::from(vec![10]);
        let summary = run_all(
            &lasers(),
            &powers,
            Arc::new(DiscardDestination),
            ExecutionMode::Concurrent,
        )
        .expect("batch should succeed");

        let destinations: Vec<&str> = summary
            .reports
            .iter()
            .map(|report| report.laser.output_destination.as_str())
            .collect();
        assert_eq!(destinations, vec!["md1.out", "pi1.out", "md2.out"]);
        assert_eq!(summary.laser_count(), 3);
        assert_eq!(summary.row_count(), 48);
    }

    #[test]
    fn concurrent_rows_match_sequential_rows() {
        let powers = InputPowerSet::from(vec![10, 20]);
        let concurrent = run_all(
            &lasers(),
            &powers,
            Arc::new(DiscardDestination),
            ExecutionMode::Concurrent,
        )
        .expect("concurrent batch should succeed");
        let sequential = run_all(
            &lasers(),
            &powers,
            Arc::new(DiscardDestination),
            ExecutionMode::Sequential,
        )
        .expect("sequential batch should succeed");

        for (left, right) in concurrent.reports.iter().zip(&sequential.reports) {
            assert_eq!(left.laser, right.laser);
            assert_eq!(left.rows, right.rows);
        }
    }

    #[test]
    fn one_failing_destination_fails_the_batch() {
        let mut lasers = lasers();
        lasers.insert(1, LaserConfig::new("bad.out", 12.5, 120, "MD"));
        let powers = InputPowerSet::from(vec![10]);

        for mode in [ExecutionMode::Concurrent, ExecutionMode::Sequential] {
            let error = run_all(&lasers, &powers, Arc::new(SelectiveDestination), mode)
                .expect_err("batch should fail");
            assert_eq!(error.category(), SatinErrorCategory::IoSystemError);
            assert!(error.message().contains("bad.out"));
        }
    }

    #[test]
    fn failure_is_returned_without_waiting_for_slow_siblings() {
        let (release, gate) = mpsc::channel();
        let destination = Arc::new(GatedDestination {
            gate: Mutex::new(gate),
        });
        let lasers = vec![
            LaserConfig::new("slow.out", 12.5, 120, "MD"),
            LaserConfig::new("bad.out", 12.5, 120, "MD"),
        ];
        let powers = InputPowerSet::from(vec![10]);

        let clock = Instant::now();
        let error = run_all(&lasers, &powers, destination, ExecutionMode::Concurrent)
            .expect_err("bad.out should fail the batch");
        let waited = clock.elapsed();
        let _ = release.send(());

        assert_eq!(error.code(), "IO.REPORT_OPEN");
        assert!(
            waited < Duration::from_secs(10),
            "failure took {waited:?}; the slow sibling was waited for"
        );
    }

    #[test]
    fn shared_destination_is_rejected_before_any_work() {
        let mut lasers = lasers();
        lasers.push(LaserConfig::new("pi1.out", 9.0, 90, "PI"));

        for mode in [ExecutionMode::Concurrent, ExecutionMode::Sequential] {
            let error = run_all(
                &lasers,
                &InputPowerSet::from(vec![10]),
                Arc::new(DiscardDestination),
                mode,
            )
            .expect_err("pi1.out is used twice");
            assert_eq!(error.category(), SatinErrorCategory::InputValidationError);
            assert_eq!(error.code(), "INPUT.LASER_DUPLICATE");
            assert!(error.message().contains("pi1.out"));
        }
    }

    #[test]
    fn no_lasers_is_an_empty_success() {
        let summary = run_all(
            &[],
            &InputPowerSet::from(vec![10]),
            Arc::new(DiscardDestination),
            ExecutionMode::Concurrent,
        )
        .expect("empty batch should succeed");
        assert_eq!(summary.laser_count(), 0);
        assert_eq!(summary.row_count(), 0);
    }
}
