use crate::extract::Step;
use crate::extract::step::ExtractionResponse;
use crate::error::ExtractionError;

/// A trait for extraction formats that can be converted into stepflow `Step`s.
///
/// Extractors that do not speak the `{ "steps": [...] }` wire format implement this
/// on their own output type and hand the result to the constructor.
///
/// # Example
///
/// ```rust,no_run
/// use stepflow::prelude::*;
/// use stepflow::error::ExtractionError;
///
/// struct Task { name: String, kind: String, after: Option<String> }
/// struct Plan { tasks: Vec<Task> }
///
/// impl IntoSteps for Plan {
///     fn into_steps(self) -> Result<Vec<Step>, ExtractionError> {
///         Ok(self
///             .tasks
///             .into_iter()
///             .enumerate()
///             .map(|(i, task)| Step {
///                 id: (i + 1).to_string(),
///                 label: task.name,
///                 step_type: task.kind,
///                 dependencies: task.after.into_iter().collect(),
///             })
///             .collect())
///     }
/// }
/// ```
pub trait IntoSteps {
    /// Consumes the object and converts it into an ordered step list.
    fn into_steps(self) -> Result<Vec<Step>, ExtractionError>;
}

impl IntoSteps for Vec<Step> {
    fn into_steps(self) -> Result<Vec<Step>, ExtractionError> {
        Ok(self)
    }
}

impl IntoSteps for ExtractionResponse {
    fn into_steps(self) -> Result<Vec<Step>, ExtractionError> {
        match self {
            ExtractionResponse::Steps { steps } => Ok(steps),
            ExtractionResponse::Failure { error } => Err(ExtractionError::Service(error)),
        }
    }
}
