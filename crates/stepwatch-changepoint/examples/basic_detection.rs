//! Basic regression detection example
//!
//! Run with `RUST_LOG=debug` to see the pipeline's tracing output.

use stepwatch_changepoint::{detect_table, SimpleDetector, WindowedRegressionDetector};
use stepwatch_core::{BenchmarkSample, DetectorParameters, Direction};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Benchmark Regression Detection ===\n");

    // Example 1: a single series with a durable slowdown
    println!("1. Step regression in wall time");
    let data: Vec<f64> = (0..80)
        .map(|i| {
            let level = if i < 35 { 0.120 } else { 0.185 };
            level + (i as f64 * 0.7).sin() * 0.002
        })
        .collect();

    let detector = WindowedRegressionDetector::default();
    let result = detector.detect_simple(&data)?;
    println!("  Data: 0.120s -> 0.185s at index 35");
    print!("{result}");

    // Example 2: throughput, where a drop is the regression
    println!("\n2. Throughput drop");
    let data: Vec<f64> = (0..60).map(|i| if i < 30 { 950.0 } else { 610.0 }).collect();
    let params = DetectorParameters::default()
        .with_window_size(11)
        .with_direction(Direction::HigherIsBetter);
    let result = WindowedRegressionDetector::new(params)?.detect_simple(&data)?;
    for cp in result.changepoints() {
        println!("    {cp}");
    }

    // Example 3: a whole table with two parameterizations of one benchmark
    println!("\n3. Table with two series");
    let mut rows = Vec::new();
    for i in 0..50i64 {
        let slow = if i >= 25 { 2.0 } else { 1.0 };
        rows.push(BenchmarkSample::new(i, format!("{i:07x}"), "time_join", "how='left'", Some(slow)));
        rows.push(BenchmarkSample::new(i, format!("{i:07x}"), "time_join", "how='inner'", Some(1.0)));
    }
    rows.push(BenchmarkSample::new(50, "failed", "time_join", "how='left'", None));

    let out = detect_table(&rows, &DetectorParameters::default())?;
    println!("  {} rows in, {} rows out", rows.len(), out.len());
    for row in out.iter().filter(|r| r.is_regression()) {
        println!("    {row}");
    }

    Ok(())
}
