//! The boundary to the service that turns free text into workflow steps.

pub mod http;
pub mod step;

pub use http::*;
pub use step::*;

use crate::error::ExtractionError;
use futures::future::BoxFuture;

/// Turns a user message into an ordered list of steps.
pub trait StepExtractor: Send + Sync {
    fn extract<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<Vec<Step>, ExtractionError>>;
}

/// Returns the same steps for every message.
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    steps: Vec<Step>,
}

impl StaticExtractor {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

impl StepExtractor for StaticExtractor {
    fn extract<'a>(&'a self, _message: &'a str) -> BoxFuture<'a, Result<Vec<Step>, ExtractionError>> {
        Box::pin(async move { Ok(self.steps.clone()) })
    }
}
