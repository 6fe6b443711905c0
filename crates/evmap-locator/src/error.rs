use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("location tracker closed")]
    TrackerClosed,

    #[error("invalid position fix {line:?}: {reason}")]
    InvalidFix { line: String, reason: String },
}
