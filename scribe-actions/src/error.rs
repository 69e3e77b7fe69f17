use thiserror::Error;

/// Errors raised by the action registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No action is registered under the requested name.
    #[error("unknown action `{name}`")]
    UnknownAction { name: String },
}
