use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Performance analysis attached to a submission, stored as `ai_analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub detected_exercise: String,
    pub form_quality: u32,
    pub metrics: BTreeMap<String, Value>,
    pub feedback: Vec<String>,
    pub cheat_detection: CheatDetection,
}

impl AnalysisResult {
    /// Numeric view of a metric, accepting both numbers and numeric strings
    pub fn metric_f64(&self, name: &str) -> Option<f64> {
        match self.metrics.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Metrics as the JSON object persisted in `performance_metrics`
    pub fn metrics_json(&self) -> Value {
        Value::Object(
            self.metrics
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheatDetection {
    #[serde(rename = "cheating_detected")]
    pub flagged: bool,
    pub confidence: f64,
}
