use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edbench_client::{from_async_fn, EvalClient, SystemResponse};
use edbench_types::outcome_table;
use serde_json::{json, Map, Value};

#[derive(Debug, Parser)]
#[command(name = "edbench", about = "Submit AI system responses to the EDB evaluation service")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Show dataset version, dimensions, and total case count
	Info(CommonArgs),
	/// List all test case ids
	Cases(CommonArgs),
	/// Fetch a single test case
	Case(CaseArgs),
	/// Evaluate one hand-written response against a case
	Evaluate(EvaluateArgs),
	/// Run a system over every case and submit the batch
	Run(RunArgs),
}

#[derive(Debug, Clone, Parser)]
struct CommonArgs {
	/// Base URL of the EDB evaluation API
	#[arg(long)]
	api_url: String,

	/// API key for the evaluation endpoints (falls back to EDB_API_KEY)
	#[arg(long)]
	api_key: Option<String>,
}

impl CommonArgs {
	fn client(&self) -> Result<EvalClient> {
		let api_key = self
			.api_key
			.clone()
			.or_else(|| std::env::var("EDB_API_KEY").ok());
		let client = match api_key {
			Some(key) => EvalClient::with_api_key(&self.api_url, key)?,
			None => EvalClient::new(&self.api_url)?,
		};
		Ok(client)
	}
}

#[derive(Debug, Clone, Parser)]
struct CaseArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Test case id (e.g. "edb-p-001")
	case_id: String,
}

#[derive(Debug, Clone, Parser)]
struct EvaluateArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Test case id to evaluate against
	case_id: String,

	/// Your system's decision text
	#[arg(long)]
	decision: String,

	/// Your system's reasoning text
	#[arg(long)]
	reasoning: String,

	/// Confidence in [0, 1]
	#[arg(long)]
	confidence: f64,

	/// Optional metadata as a JSON object
	#[arg(long)]
	metadata: Option<String>,
}

#[derive(Debug, Clone, Parser)]
struct RunArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Name your system is submitted under
	#[arg(long)]
	system_name: String,

	/// HTTP endpoint of the system under test (POST, receives { "case": <case> }
	/// and must reply with { "decision", "reasoning", "confidence" })
	#[arg(long)]
	http_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	match cli.command {
		Commands::Info(args) => info(args).await?,
		Commands::Cases(args) => cases(args).await?,
		Commands::Case(args) => case(args).await?,
		Commands::Evaluate(args) => evaluate(args).await?,
		Commands::Run(args) => run(args).await?,
	}
	Ok(())
}

async fn info(args: CommonArgs) -> Result<()> {
	let client = args.client()?;
	let info = client.dataset_info().await?;

	println!("Dataset version: {}", info.version);
	println!("Total cases: {}", info.total_cases);
	if !info.dimensions.is_empty() {
		println!("Dimensions: {}", info.dimensions.join(", "));
	}
	Ok(())
}

async fn cases(args: CommonArgs) -> Result<()> {
	let client = args.client()?;
	for case_id in client.list_cases().await? {
		println!("{case_id}");
	}
	Ok(())
}

async fn case(args: CaseArgs) -> Result<()> {
	let client = args.common.client()?;
	let case = client.get_case(&args.case_id).await?;
	println!("{}", serde_json::to_string_pretty(&case)?);
	Ok(())
}

async fn evaluate(args: EvaluateArgs) -> Result<()> {
	let client = args.common.client()?;

	let response = match args.metadata {
		Some(raw) => {
			let metadata: Map<String, Value> =
				serde_json::from_str(&raw).context("--metadata must be a JSON object")?;
			SystemResponse::with_metadata(args.decision, args.reasoning, args.confidence, metadata)
		}
		None => SystemResponse::new(args.decision, args.reasoning, args.confidence),
	};

	let result = client.evaluate_case(&args.case_id, &response).await?;
	print_outcome(&result);
	Ok(())
}

async fn run(args: RunArgs) -> Result<()> {
	let client = args.common.client()?;

	let system = if let Some(url) = args.http_url {
		from_async_fn(move |case| {
			let url = url.clone();
			let case = case.clone();
			async move {
				let http = reqwest::Client::new();
				let resp = http.post(&url).json(&json!({ "case": case })).send().await?;
				let status = resp.status();
				let v = resp.json::<serde_json::Value>().await?;
				if !status.is_success() {
					anyhow::bail!("HTTP {}: {}", status.as_u16(), v);
				}
				let response: SystemResponse = serde_json::from_value(v)?;
				Ok(response)
			}
		})
	} else {
		// Default "echo" system: answer with the case query at zero confidence
		from_async_fn(|case| {
			let case = case.clone();
			async move {
				let query = case
					.pointer("/input/query")
					.and_then(Value::as_str)
					.unwrap_or_default();
				Ok(SystemResponse::new(query, "echoed case query", 0.0))
			}
		})
	};

	let outcome = client.evaluate_all(&args.system_name, system).await?;
	print_outcome(&outcome);
	Ok(())
}

fn print_outcome(outcome: &Value) {
	match outcome_table(outcome) {
		Some(table) => println!("{table}"),
		None => println!(
			"{}",
			serde_json::to_string_pretty(outcome).unwrap_or_else(|_| outcome.to_string())
		),
	}
}
