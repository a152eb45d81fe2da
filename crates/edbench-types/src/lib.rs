use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tabled::{Table, Tabled};

/// Response format required by the evaluation service.
///
/// Immutable once constructed; `confidence` is expected in `[0, 1]` but is
/// passed through unvalidated. Validation is the service's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemResponse {
	pub decision: String,
	pub reasoning: String,
	pub confidence: f64,
	pub metadata: Option<Map<String, Value>>,
}

impl SystemResponse {
	pub fn new(decision: impl Into<String>, reasoning: impl Into<String>, confidence: f64) -> Self {
		Self {
			decision: decision.into(),
			reasoning: reasoning.into(),
			confidence,
			metadata: None,
		}
	}

	pub fn with_metadata(
		decision: impl Into<String>,
		reasoning: impl Into<String>,
		confidence: f64,
		metadata: Map<String, Value>,
	) -> Self {
		Self {
			decision: decision.into(),
			reasoning: reasoning.into(),
			confidence,
			metadata: Some(metadata),
		}
	}

	/// Wire form submitted to the evaluation endpoints.
	///
	/// Always carries all four keys; a missing `metadata` becomes `{}`.
	pub fn to_payload(&self) -> Value {
		json!({
			"decision": self.decision,
			"reasoning": self.reasoning,
			"confidence": self.confidence,
			"metadata": self.metadata.clone().unwrap_or_default(),
		})
	}
}

/// Dataset metadata from `/dataset/info`.
///
/// Unknown fields are kept in `extra` so server-side schema additions do
/// not require a client change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
	pub version: String,
	pub total_cases: u64,
	#[serde(default)]
	pub dimensions: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
struct DimensionRow {
	dimension: String,
	score: f64,
}

/// Render a scored evaluation outcome as a dimension table plus a summary
/// line. Returns `None` when the payload does not carry the expected keys
/// (the outcome schema is server-owned).
pub fn outcome_table(outcome: &Value) -> Option<String> {
	let overall = outcome.get("overall_score")?.as_f64()?;
	let passed = outcome.get("passed").and_then(Value::as_bool).unwrap_or(false);
	let dimensions = outcome.get("dimension_scores")?.as_object()?;

	let rows: Vec<DimensionRow> = dimensions
		.iter()
		.map(|(name, score)| DimensionRow {
			dimension: name.clone(),
			score: score.as_f64().unwrap_or(0.0),
		})
		.collect();

	let table = Table::new(rows).to_string();

	let summary_text = format!(
		"Overall: {:.3}  Passed: {}",
		overall,
		if passed { "✓" } else { "✗" }
	);

	Some(format!("{}\n\n{}\n", table, summary_text))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn payload_has_all_keys_with_default_metadata() {
		let response = SystemResponse::new("approve", "tariff allows it", 0.92);
		let payload = response.to_payload();

		assert_eq!(payload["decision"], json!("approve"));
		assert_eq!(payload["reasoning"], json!("tariff allows it"));
		assert_eq!(payload["confidence"], json!(0.92));
		assert_eq!(payload["metadata"], json!({}));

		let keys: Vec<&String> = payload.as_object().unwrap().keys().collect();
		assert_eq!(keys.len(), 4);
	}

	#[test]
	fn payload_passes_metadata_through_unchanged() {
		let mut metadata = Map::new();
		metadata.insert("processing_time_ms".to_string(), json!(150));

		let response =
			SystemResponse::with_metadata("reject", "power above limit", 0.7, metadata);
		let payload = response.to_payload();

		assert_eq!(payload["metadata"], json!({ "processing_time_ms": 150 }));
	}

	#[test]
	fn out_of_range_confidence_is_not_clamped() {
		let response = SystemResponse::new("approve", "", 1.7);
		assert_eq!(response.to_payload()["confidence"], json!(1.7));
	}

	#[test]
	fn dataset_info_keeps_unknown_fields() {
		let info: DatasetInfo = serde_json::from_value(json!({
			"version": "1.2.0",
			"total_cases": 48,
			"dimensions": ["accuracy", "compliance"],
			"release_notes": "added commercial tariffs"
		}))
		.unwrap();

		assert_eq!(info.version, "1.2.0");
		assert_eq!(info.total_cases, 48);
		assert_eq!(info.dimensions, vec!["accuracy", "compliance"]);
		assert_eq!(info.extra["release_notes"], json!("added commercial tariffs"));
	}

	#[test]
	fn dataset_info_dimensions_default_empty() {
		let info: DatasetInfo =
			serde_json::from_value(json!({ "version": "1.0.0", "total_cases": 10 })).unwrap();
		assert!(info.dimensions.is_empty());
	}

	#[test]
	fn outcome_table_renders_scored_result() {
		let outcome = json!({
			"overall_score": 0.84,
			"passed": true,
			"dimension_scores": { "accuracy": 0.9, "compliance": 0.78 }
		});

		let table = outcome_table(&outcome).unwrap();
		assert!(table.contains("accuracy"));
		assert!(table.contains("compliance"));
		assert!(table.contains("Overall: 0.840"));
		assert!(table.contains("✓"));
	}

	#[test]
	fn outcome_table_rejects_unscored_payload() {
		assert!(outcome_table(&json!({ "status": "queued" })).is_none());
		assert!(outcome_table(&json!("not an object")).is_none());
	}
}
