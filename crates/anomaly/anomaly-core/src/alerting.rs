//! Alerting system implementation.

use std::time::{SystemTime, UNIX_EPOCH};

use anomaly_spi::{Alert, AlertSeverity, Result, Verdict, VerdictSink};
use tracing::warn;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn default_severity(verdict: &Verdict) -> AlertSeverity {
    if verdict.is_anomaly_z() && verdict.is_anomaly_mad() {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    }
}

fn default_message(verdict: &Verdict) -> String {
    let fired: Vec<String> = verdict.fired_by().iter().map(|k| k.to_string()).collect();
    format!(
        "Anomaly at step {}: value={:.4}, z={:.4}, mad={:.4} ({})",
        verdict.step,
        verdict.value,
        verdict.zscore.score,
        verdict.mad.score,
        fired.join(", ")
    )
}

/// Create an alert for an anomalous verdict.
///
/// Returns `None` when neither detector fired.
pub fn create_alert(verdict: &Verdict) -> Option<Alert> {
    if !verdict.is_anomaly {
        return None;
    }
    Some(AlertBuilder::new(*verdict).build())
}

/// Alert builder for custom alert creation.
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    verdict: Verdict,
    severity: Option<AlertSeverity>,
    message: Option<String>,
}

impl AlertBuilder {
    /// Create a new alert builder.
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            severity: None,
            message: None,
        }
    }

    /// Set custom severity.
    pub fn severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set custom message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the alert.
    pub fn build(self) -> Alert {
        let severity = self
            .severity
            .unwrap_or_else(|| default_severity(&self.verdict));
        let message = self
            .message
            .unwrap_or_else(|| default_message(&self.verdict));

        Alert {
            timestamp: now_secs(),
            step: self.verdict.step,
            value: self.verdict.value,
            zscore: self.verdict.zscore.score,
            mad_score: self.verdict.mad.score,
            severity,
            message,
        }
    }
}

/// Sink adapter that raises an alert for every anomalous verdict before
/// forwarding all verdicts to the wrapped sink.
#[derive(Debug)]
pub struct AlertSink<S> {
    inner: S,
    alerts: Vec<Alert>,
}

impl<S: VerdictSink> AlertSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            alerts: Vec::new(),
        }
    }

    /// Alerts raised so far.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_parts(self) -> (S, Vec<Alert>) {
        (self.inner, self.alerts)
    }
}

impl<S: VerdictSink> VerdictSink for AlertSink<S> {
    fn accept(&mut self, verdict: Verdict) -> Result<()> {
        if let Some(alert) = create_alert(&verdict) {
            warn!(severity = ?alert.severity, "{}", alert.message);
            self.alerts.push(alert);
        }
        self.inner.accept(verdict)
    }
}
