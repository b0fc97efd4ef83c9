use thiserror::Error;

/// Faults raised while computing a tick. Any of these aborts the tick without
/// touching the controller's persistent state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteeringError {
    #[error("max turn rate must be positive and finite, got {0}")]
    InvalidTurnRate(f64),

    #[error("non-finite {quantity} ({value})")]
    NonFinite { quantity: &'static str, value: f64 },
}

/// Rejects NaN or infinite intermediate values by name.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, SteeringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SteeringError::NonFinite { quantity, value })
    }
}
