// Demo: evaluate a single hand-written response against one benchmark case.
//
// To run from the workspace root:
//   cargo run -p edbench-client --example quickstart -- <api-url> [api-key]

use edbench_client::{outcome_table, EvalClient, SystemResponse};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_url = std::env::args()
        .nth(1)
        .expect("usage: quickstart <api-url> [api-key]");
    let api_key = std::env::args().nth(2);

    let client = match api_key {
        Some(key) => EvalClient::with_api_key(&api_url, key)?,
        None => EvalClient::new(&api_url)?,
    };

    let info = client.dataset_info().await?;
    println!("Dataset version: {}", info.version);
    println!("Total cases: {}", info.total_cases);

    let case = client.get_case("edb-p-001").await?;
    println!("\nCase:\n{}", serde_json::to_string_pretty(&case)?);

    // Your system processes the case; replace with real output
    let response = SystemResponse::new(
        "Maintain current power contract",
        "Based on consumption patterns, the current setup is optimal",
        0.85,
    );

    if client.is_authenticated() {
        let result = client.evaluate_case("edb-p-001", &response).await?;
        match outcome_table(&result) {
            Some(table) => println!("\n{table}"),
            None => println!("\n{}", serde_json::to_string_pretty(&result)?),
        }
    } else {
        println!("\nPass an api key to submit the response for evaluation");
    }

    Ok(())
}
