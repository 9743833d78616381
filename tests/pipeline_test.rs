/*!
 * Pipeline Tests
 * End-to-end read, parse, sort, merge, and output
 */

use cosort::pipeline::{FileSlot, Worker};
use cosort::runtime::{QuantumConfig, Scheduler};
use cosort::{merge_into, parse, run_pipeline, MemoryReader, ReadError, RuntimeError, TokioReader};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn example_reader() -> MemoryReader {
    MemoryReader::new()
        .with_file("f1", "5 3 8 1")
        .with_file("f2", "9 2")
}

#[test]
fn test_two_files_sorted_and_reported() {
    let output = run_pipeline(
        &paths(&["f1", "f2"]),
        example_reader(),
        QuantumConfig::every_checkpoint(),
    )
    .unwrap();

    assert_eq!(output.arrays, vec![vec![1, 3, 5, 8], vec![2, 9]]);

    let report = &output.report;
    assert_eq!(report.latency_micros, 0);
    assert_eq!(report.contexts.len(), 2);
    assert_eq!(report.scheduler.finished, 2);
    assert_eq!(report.contexts[0].path, PathBuf::from("f1"));
    assert_eq!(report.contexts[0].values, 4);
    assert_eq!(report.contexts[0].bytes_read, 7);
    assert_eq!(report.contexts[1].values, 2);
    assert!(report.contexts.iter().all(|c| c.stats.finished));

    let text = report.to_string();
    assert!(text.starts_with("Latency: 0µs\n"));
    assert!(text.contains("Coroutine 0 ran for"));
    assert!(text.contains("Coroutine 1 ran for"));
    assert!(text.contains("Whole program ran for"));
}

#[test]
fn test_pending_reads_are_polled_at_checkpoints() {
    let reader = example_reader().with_pending_polls(3);
    let output = run_pipeline(
        &paths(&["f1", "f2"]),
        reader,
        QuantumConfig::every_checkpoint(),
    )
    .unwrap();

    for ctx in &output.report.contexts {
        assert_eq!(ctx.read_polls, 4);
    }
    assert_eq!(output.arrays, vec![vec![1, 3, 5, 8], vec![2, 9]]);
}

#[test]
fn test_worker_releases_buffer_after_parse() {
    let mut scheduler = Scheduler::builder()
        .with_quantum(QuantumConfig::every_checkpoint())
        .with_context(Worker::new("f1", example_reader()))
        .build()
        .unwrap();

    scheduler.wait_for_all().unwrap();
    let worker = scheduler.program(0).unwrap();
    assert!(matches!(worker.file(), FileSlot::Released { bytes: 7 }));
    assert_eq!(worker.array().to_vec(), vec![1, 3, 5, 8]);
}

#[test]
fn test_empty_and_malformed_files() {
    let reader = MemoryReader::new()
        .with_file("empty", "")
        .with_file("partial", "4 -2 x 9");
    let output = run_pipeline(
        &paths(&["empty", "partial"]),
        reader,
        QuantumConfig::default(),
    )
    .unwrap();

    assert_eq!(output.arrays, vec![vec![], vec![-2, 4]]);
}

#[test]
fn test_missing_file_aborts_run() {
    let err = run_pipeline(
        &paths(&["f1", "nope"]),
        example_reader(),
        QuantumConfig::default(),
    )
    .unwrap_err();

    match err {
        RuntimeError::Read(ReadError::Io { path, .. }) => assert_eq!(path, PathBuf::from("nope")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_tokio_reader_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.txt");
    let second = dir.path().join("b.txt");
    fs::write(&first, "5 3 8 1\n").unwrap();
    fs::write(&second, "  9\n2").unwrap();

    let reader = TokioReader::new().unwrap();
    let output = run_pipeline(
        &[first, second],
        reader,
        QuantumConfig::from_micros(50),
    )
    .unwrap();
    assert_eq!(output.arrays, vec![vec![1, 3, 5, 8], vec![2, 9]]);
    assert!(output.report.contexts.iter().all(|c| c.read_polls >= 1));

    let out_path = dir.path().join("mergedFile");
    let merged = merge_into(&out_path, output.arrays).unwrap();
    assert_eq!(merged, vec![1, 2, 3, 5, 8, 9]);
    assert_eq!(fs::read_to_string(&out_path).unwrap(), "1 2 3 5 8 9 ");
}

#[test]
fn test_tokio_reader_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let err = run_pipeline(
        &[missing],
        TokioReader::new().unwrap(),
        QuantumConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RuntimeError::Read(ReadError::Io { .. })));
}

#[test]
fn test_merge_into_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("no-such-dir").join("mergedFile");

    let err = merge_into(&target, vec![vec![1]]).unwrap_err();
    assert!(matches!(err, RuntimeError::Output { .. }));
}

#[test]
fn test_merged_output_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("mergedFile");
    let merged = merge_into(&out_path, vec![vec![-3, 0, 7], vec![-3, 2], vec![]]).unwrap();

    let written = fs::read(&out_path).unwrap();
    assert_eq!(parse(&written), merged);
    assert_eq!(merged, vec![-3, -3, 0, 2, 7]);
}
