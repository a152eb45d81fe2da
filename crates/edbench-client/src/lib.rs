//! edbench-client: client for the EDB remote evaluation service.
//! Fetch benchmark cases, submit your system's responses, and retrieve
//! scored results. Scoring happens entirely behind the remote API.
//! See `demos/quickstart.rs` for a walkthrough.

pub mod client;
pub mod error;
pub mod system;
pub mod testing;

pub use client::EvalClient;
pub use error::{ClientError, ClientResult};
pub use system::{from_async_fn, System};

pub use edbench_types::{outcome_table, DatasetInfo, SystemResponse};
