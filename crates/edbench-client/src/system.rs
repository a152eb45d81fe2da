use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use edbench_types::SystemResponse;

/// The system under evaluation: maps a benchmark case to a response.
#[async_trait]
pub trait System: Send + Sync {
    async fn respond(&self, case: &Value) -> Result<SystemResponse>;
}

/// Wrap an async closure as a `System`.
pub fn from_async_fn<F, Fut>(f: F) -> Arc<dyn System>
where
    F: Send + Sync + 'static + Fn(&Value) -> Fut,
    Fut: Future<Output = Result<SystemResponse>> + Send + 'static,
{
    struct ClosureSystem<F, Fut>
    where
        F: Send + Sync + 'static + Fn(&serde_json::Value) -> Fut,
        Fut: Future<Output = Result<SystemResponse>> + Send + 'static,
    {
        f: F,
    }

    #[async_trait]
    impl<F, Fut> System for ClosureSystem<F, Fut>
    where
        F: Send + Sync + 'static + Fn(&serde_json::Value) -> Fut,
        Fut: Future<Output = Result<SystemResponse>> + Send + 'static,
    {
        async fn respond(&self, case: &Value) -> Result<SystemResponse> {
            (self.f)(case).await
        }
    }

    Arc::new(ClosureSystem { f })
}
