use satin_core::domain::{ExecutionMode, InputPowerSet, LaserConfig};
use satin_core::modules::{FileReportDestination, LaserTask, report::render_table, run_all};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn lasers() -> Vec<LaserConfig> {
    vec![
        LaserConfig::new("mdaa.out", 12.5, 120, "MD"),
        LaserConfig::new("piab.out", 9.5, 95, "PI"),
        LaserConfig::new("mdac.out", 4.0, 60, "MD"),
        LaserConfig::new("piad.out", 15.0, 150, "PI"),
    ]
}

/// Report text with the two timestamp lines removed.
fn untimed_report(path: &Path) -> String {
    fs::read_to_string(path)
        .expect("report should exist")
        .lines()
        .filter(|line| !line.starts_with("Start date: ") && !line.starts_with("End date: "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn concurrent_reports_are_identical_to_isolated_sequential_runs() {
    let powers = InputPowerSet::from(vec![10, 150]);
    let concurrent_dir = TempDir::new().expect("tempdir should be created");
    let isolated_dir = TempDir::new().expect("tempdir should be created");

    run_all(
        &lasers(),
        &powers,
        Arc::new(FileReportDestination::new(concurrent_dir.path())),
        ExecutionMode::Concurrent,
    )
    .expect("concurrent batch should succeed");

    for laser in lasers() {
        run_all(
            std::slice::from_ref(&laser),
            &powers,
            Arc::new(FileReportDestination::new(isolated_dir.path())),
            ExecutionMode::Sequential,
        )
        .expect("isolated run should succeed");
    }

    for laser in lasers() {
        assert_eq!(
            untimed_report(&concurrent_dir.path().join(&laser.output_destination)),
            untimed_report(&isolated_dir.path().join(&laser.output_destination)),
            "report for {} diverged",
            laser.output_destination
        );
    }
}

#[test]
fn written_tables_match_pure_computation() {
    let powers = InputPowerSet::from(vec![25]);
    let temp = TempDir::new().expect("tempdir should be created");
    let summary = run_all(
        &lasers(),
        &powers,
        Arc::new(FileReportDestination::new(temp.path())),
        ExecutionMode::Concurrent,
    )
    .expect("batch should succeed");

    for report in &summary.reports {
        let expected = LaserTask::new(&report.laser, powers.as_slice()).compute_rows();
        assert_eq!(report.rows, expected);

        let written = fs::read_to_string(temp.path().join(&report.laser.output_destination))
            .expect("report should exist");
        assert!(written.contains(&render_table(&expected)));
    }
}
