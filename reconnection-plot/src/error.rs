use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Domain too small along {axis}: need at least {min} points, got {len}")]
    DegenerateSize {
        axis: &'static str,
        len: usize,
        min: usize,
    },

    #[error("Invalid bounds along {axis}: [{lo}, {hi}] for an axis of {len} points")]
    InvalidBounds {
        axis: &'static str,
        lo: usize,
        hi: usize,
        len: usize,
    },

    #[error("Malformed snapshot: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FieldResult<T> = Result<T, FieldError>;
