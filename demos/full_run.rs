// Demo: run a toy system over every benchmark case and submit the batch.
//
// To run from the workspace root:
//   cargo run -p edbench-client --example full_run -- <api-url> <api-key>

use edbench_client::{from_async_fn, outcome_table, EvalClient, SystemResponse};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_url = std::env::args()
        .nth(1)
        .expect("usage: full_run <api-url> <api-key>");
    let api_key = std::env::args()
        .nth(2)
        .expect("api key required for evaluation");

    let client = EvalClient::with_api_key(&api_url, api_key)?;

    // Toy system: restate the query as the decision. Replace with your agent.
    let system = from_async_fn(|case| {
        let case = case.clone();
        async move {
            let query = case
                .pointer("/input/query")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Ok(SystemResponse::new(
                format!("Decision for: {query}"),
                "toy system, no real reasoning",
                0.1,
            ))
        }
    });

    let outcome = client.evaluate_all("toy-system", system).await?;
    match outcome_table(&outcome) {
        Some(table) => println!("{table}"),
        None => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(())
}
