//! Basic example demonstrating streaming anomaly detection
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{create_alert, EvaluatorConfig, StreamEvaluator, SyntheticSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly Basic Example ===\n");

    let config = EvaluatorConfig::builder()
        .window_size(30)
        .z_threshold(2.0)
        .mad_threshold(3.0)
        .build()?;
    let mut evaluator = StreamEvaluator::new(config)?;
    let mut source = SyntheticSource::new(42);

    for _ in 0..300 {
        let verdict = evaluator.process_next(&mut source)?;
        if let Some(alert) = create_alert(&verdict) {
            println!("   [{:?}] {}", alert.severity, alert.message);
        }
    }

    println!("\nProcessed {} observations", evaluator.steps_processed());
    println!("\n=== Example Complete ===");
    Ok(())
}
