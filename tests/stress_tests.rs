//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Entries from many threads on one logger never interleave within a line
//! - Copies handed to threads keep their own fields
//! - Metrics stay consistent under concurrent use

use fieldlog::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

#[test]
fn test_shared_logger_writes_whole_lines() {
    let buffer = MemoryBuffer::new();
    let logger = Arc::new(
        Logger::builder()
            .sink(Sink::memory(&buffer))
            .fields(fields! { "service" => "stress" })
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info_fmt(format_args!("thread {} message {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in &lines {
        assert!(line.contains(" service=stress INFO thread "), "corrupted line: {:?}", line);
        assert!(line.ends_with(' '), "corrupted line: {:?}", line);
    }

    let unique: HashSet<&String> = lines.iter().collect();
    assert_eq!(unique.len(), lines.len());
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_copies_per_thread_keep_their_fields() {
    let buffer = MemoryBuffer::new();
    let base = Logger::builder()
        .sink(Sink::memory(&buffer))
        .formatter(OutputFormat::Json)
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let mut logger = base.copy();
            logger.put_fields(fields! { "worker" => t });
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.debug_fmt(format_args!("{}", i));
                }
                logger.metrics().total_logged()
            })
        })
        .collect();

    let logged: u64 = handles
        .into_iter()
        .map(|h| h.join().expect("logging thread panicked"))
        .sum();
    assert_eq!(logged, (THREADS * PER_THREAD) as u64);

    let mut per_worker = vec![0usize; THREADS];
    for line in buffer.lines() {
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("whole JSON line");
        let worker = parsed["fields"]["worker"].as_u64().expect("worker field") as usize;
        per_worker[worker] += 1;
    }
    assert!(per_worker.iter().all(|count| *count == PER_THREAD));
    assert!(base.fields().is_empty());
}

#[test]
fn test_concurrent_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Arc::new(Logger::with_sink(
        Sink::file(&log_file).expect("Failed to open log file"),
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.warn(format!("writer {} line {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert!(lines.iter().all(|line| line.contains(" WARN writer ")));
}
