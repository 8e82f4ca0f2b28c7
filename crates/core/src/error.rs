#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid journal step '{0}'. Must be a number between 0 and 6")]
    InvalidStep(String),
}
