//! End-to-end tests for anomaly crate
//!
//! Tests complete streaming workflows using only this crate's API.

use anomaly::{
    AlertSeverity, AlertSink, EvaluatorConfig, StreamEvaluator, SyntheticSource, Verdict,
    VerdictLog,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn clean_sine(len: usize) -> Vec<f64> {
    (0..len).map(|t| 10.0 * (0.2 * t as f64).sin()).collect()
}

#[test]
fn e2e_clean_sine_has_no_false_positives() {
    init_tracing();
    let mut eval = StreamEvaluator::new(EvaluatorConfig::default()).unwrap();
    let mut source = clean_sine(500).into_iter();
    let mut log = VerdictLog::new();

    let summary = eval.run(&mut source, &mut log, None).unwrap();

    assert_eq!(summary.steps, 500);
    assert_eq!(summary.anomalies, 0, "flagged: {:?}", log.anomaly_indices());
}

#[test]
fn e2e_injected_spike_is_flagged() {
    init_tracing();
    let mut data = clean_sine(200);
    data[100] = 30.0;

    let mut eval = StreamEvaluator::new(EvaluatorConfig::default()).unwrap();
    let mut source = data.into_iter();
    let mut sink = AlertSink::new(VerdictLog::new());

    eval.run(&mut source, &mut sink, None).unwrap();

    let (log, alerts) = sink.into_parts();
    assert!(log.anomaly_indices().contains(&100));
    assert!(alerts.iter().any(|a| a.step == 100));
    assert!(alerts
        .iter()
        .all(|a| matches!(a.severity, AlertSeverity::Warning | AlertSeverity::Critical)));
}

#[test]
fn e2e_synthetic_stream_workflow() {
    init_tracing();
    let mut eval = StreamEvaluator::new(EvaluatorConfig::default()).unwrap();
    let mut source = SyntheticSource::new(2024);
    let mut verdicts: Vec<Verdict> = Vec::new();

    let summary = eval.run(&mut source, &mut verdicts, Some(1_000)).unwrap();

    assert_eq!(summary.steps, 1_000);
    assert_eq!(verdicts.len(), 1_000);
    assert_eq!(summary.rejected, 0);
    for (i, verdict) in verdicts.iter().enumerate() {
        assert_eq!(verdict.step, i as u64);
        assert_eq!(verdict.is_anomaly, verdict.is_anomaly_z() || verdict.is_anomaly_mad());
    }

    let counted = verdicts.iter().filter(|v| v.is_anomaly).count() as u64;
    assert_eq!(summary.anomalies, counted);
    assert!(summary.anomalies >= summary.zscore_anomalies.max(summary.mad_anomalies));
    assert!(summary.anomalies <= summary.zscore_anomalies + summary.mad_anomalies);
}

#[test]
fn e2e_same_seed_same_verdicts() {
    let run = |seed| {
        let mut eval = StreamEvaluator::new(EvaluatorConfig::default()).unwrap();
        let mut source = SyntheticSource::new(seed);
        let mut log = VerdictLog::new();
        eval.run(&mut source, &mut log, Some(300)).unwrap();
        log.into_inner()
    };

    assert_eq!(run(9), run(9));
}

#[test]
fn e2e_lower_thresholds_flag_at_least_as_much() {
    let data: Vec<f64> = SyntheticSource::new(77).take(600).collect();

    let count = |config: EvaluatorConfig| {
        let mut eval = StreamEvaluator::new(config).unwrap();
        let mut source = data.clone().into_iter();
        let mut log = VerdictLog::new();
        eval.run(&mut source, &mut log, None).unwrap();
        log.anomaly_count()
    };

    let strict = count(EvaluatorConfig::new(30, 3.0, 5.0));
    let lenient = count(EvaluatorConfig::new(30, 1.5, 2.0));
    assert!(lenient >= strict);
}

#[test]
fn e2e_verdicts_serialize_as_json_lines() {
    let mut eval = StreamEvaluator::new(EvaluatorConfig::new(3, 2.0, 3.0)).unwrap();
    let mut source = vec![1.0, 2.0, 3.0, 4.0].into_iter();
    let mut verdicts: Vec<Verdict> = Vec::new();
    eval.run(&mut source, &mut verdicts, None).unwrap();

    let lines: Vec<String> = verdicts
        .iter()
        .map(|v| serde_json::to_string(v).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[3].starts_with(r#"{"step":3,"value":4.0,"#));
}
