//! JSON-lines verdict sink.

use std::io::Write;

use anomaly::{AnomalyError, Result, Verdict, VerdictSink};

/// Writes one JSON object per verdict, newline separated.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    anomalies_only: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, anomalies_only: bool) -> Self {
        Self {
            writer,
            anomalies_only,
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| AnomalyError::Sink(e.to_string()))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VerdictSink for JsonLinesSink<W> {
    fn accept(&mut self, verdict: Verdict) -> Result<()> {
        if self.anomalies_only && !verdict.is_anomaly {
            return Ok(());
        }
        serde_json::to_writer(&mut self.writer, &verdict)
            .map_err(|e| AnomalyError::Sink(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| AnomalyError::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly::DetectionResult;

    fn verdict(step: u64, anomalous: bool) -> Verdict {
        Verdict::new(
            step,
            1.0,
            DetectionResult::new(anomalous, 2.5),
            DetectionResult::clear(),
        )
    }

    #[test]
    fn test_writes_one_line_per_verdict() {
        let mut sink = JsonLinesSink::new(Vec::new(), false);
        sink.accept(verdict(0, false)).unwrap();
        sink.accept(verdict(1, true)).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: Verdict = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.step, 1);
        assert!(parsed.is_anomaly);
    }

    #[test]
    fn test_anomalies_only() {
        let mut sink = JsonLinesSink::new(Vec::new(), true);
        sink.accept(verdict(0, false)).unwrap();
        sink.accept(verdict(1, true)).unwrap();
        sink.accept(verdict(2, false)).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with(r#"{"step":1,"#));
    }
}
