use std::future::Future;
use std::pin::Pin;

use crate::error::NarrativeError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Text in, text out. The only thing the summary needs from a model.
///
/// Methods return boxed futures for dyn compatibility. Implementations make
/// a single attempt; retry and fallback policy belong to the caller.
pub trait TextGenerator: Send + Sync {
    /// Identifier of the backing model, for logs.
    fn model(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>>;
}
