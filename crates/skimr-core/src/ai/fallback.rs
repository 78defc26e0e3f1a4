use std::future::Future;

use super::models::Generated;
use crate::Result;

/// Run the primary path if there is one; any error switches to the fallback.
///
/// This is the single failure boundary for every LLM-backed stage. There are
/// no retries: one failed attempt goes straight to the deterministic path.
pub async fn primary_or_fallback<T, Fut, F>(
    stage: &'static str,
    primary: Option<Fut>,
    fallback: F,
) -> Generated<T>
where
    Fut: Future<Output = Result<T>>,
    F: FnOnce() -> T,
{
    let Some(primary) = primary else {
        tracing::debug!(stage, "No LLM client available, using fallback");
        return Generated::fallback(fallback());
    };

    match primary.await {
        Ok(value) => Generated::llm(value),
        Err(e) => {
            tracing::warn!(stage, error = %e, "LLM stage failed, falling back");
            Generated::fallback(fallback())
        }
    }
}
