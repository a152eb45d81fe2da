use anyhow::Result;
use serde_json::Value;

/// Helper to assert an evaluation outcome reports `passed: true`.
///
/// Use this in your `#[tokio::test]` functions to gate CI on a benchmark
/// run.
///
/// # Example
/// ```ignore
/// #[tokio::test]
/// async fn test_my_system() -> Result<()> {
///     let client = EvalClient::with_api_key(api_url, api_key)?;
///     let outcome = client.evaluate_all("my-system", system).await?;
///
///     assert_passed(&outcome)?;
///
///     Ok(())
/// }
/// ```
pub fn assert_passed(outcome: &Value) -> Result<()> {
    let passed = outcome.get("passed").and_then(Value::as_bool).unwrap_or(false);
    if !passed {
        anyhow::bail!(
            "evaluation did not pass:\n{}",
            serde_json::to_string_pretty(outcome).unwrap_or_default()
        );
    }
    Ok(())
}

/// Helper to assert the overall score meets a threshold.
pub fn assert_min_score(outcome: &Value, min_score: f64) -> Result<()> {
    let score = outcome
        .get("overall_score")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    if score < min_score {
        anyhow::bail!(
            "evaluation failed: overall score {:.3} is below threshold {:.3}",
            score,
            min_score
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passed_outcome_is_accepted() {
        let outcome = json!({ "overall_score": 0.9, "passed": true });
        assert!(assert_passed(&outcome).is_ok());
        assert!(assert_min_score(&outcome, 0.8).is_ok());
    }

    #[test]
    fn failed_outcome_is_rejected() {
        let outcome = json!({ "overall_score": 0.4, "passed": false });
        assert!(assert_passed(&outcome).is_err());
        assert!(assert_min_score(&outcome, 0.8).is_err());
    }

    #[test]
    fn missing_fields_count_as_failure() {
        let outcome = json!({ "summary": "no scores here" });
        assert!(assert_passed(&outcome).is_err());
        assert!(assert_min_score(&outcome, 0.1).is_err());
    }
}
