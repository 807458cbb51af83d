use thiserror::Error;

/// Failures of the meal and workout generation pipelines.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid meal type: {0}")]
    InvalidMealType(String),

    #[error("invalid workout category: type {workout_type}, sub type {sub_type}")]
    InvalidWorkoutCategory { workout_type: i64, sub_type: i64 },

    #[error("upstream read failed: {0:#}")]
    UpstreamReadFailure(anyhow::Error),

    #[error("malformed generation output: {0}")]
    MalformedGenerationOutput(String),

    #[error("generation request failed: {0:#}")]
    GenerationRequestFailure(anyhow::Error),

    #[error("image generation failed: {0:#}")]
    ImageGenerationFailure(anyhow::Error),

    #[error("persistence failed: {0:#}")]
    PersistenceFailure(anyhow::Error),

    #[error("insufficient credit")]
    InsufficientCredit,

    #[error("credit debit failed: {0:#}")]
    CreditDebitFailure(anyhow::Error),
}

impl GenerationError {
    /// Bad enum values or request fields; everything else is a pipeline failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::InvalidMealType(_) | Self::InvalidWorkoutCategory { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_invalid_input() {
        assert!(GenerationError::InvalidMealType("7".into()).is_invalid_input());
        assert!(GenerationError::InvalidWorkoutCategory { workout_type: 0, sub_type: 5 }
            .is_invalid_input());
        assert!(GenerationError::InvalidInput("userId".into()).is_invalid_input());
        assert!(!GenerationError::InsufficientCredit.is_invalid_input());
        assert!(!GenerationError::MalformedGenerationOutput("x".into()).is_invalid_input());
    }

    #[test]
    fn display_keeps_context_chain() {
        let err = GenerationError::PersistenceFailure(
            anyhow::anyhow!("duplicate key").context("insert meal"),
        );
        let msg = err.to_string();
        assert!(msg.contains("insert meal"));
        assert!(msg.contains("duplicate key"));
    }
}
