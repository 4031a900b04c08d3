//! Error type for session construction and configuration.

/// Errors raised while building or starting a playground session.
///
/// Per-frame work never produces these: a body missing during sync is
/// skipped and a fallen ball is respawned.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The rendering backend reported it cannot draw.
    #[error("3D rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    /// `start` was called outside the `Preload` state.
    #[error("frame scheduler already started")]
    AlreadyStarted,

    /// A collision shape has a non-positive or non-finite extent.
    #[error("invalid collision shape: {0}")]
    InvalidShape(String),

    /// Dynamic bodies need a positive, finite mass.
    #[error("invalid mass {0}: dynamic bodies need a positive finite mass")]
    InvalidMass(f32),

    /// Configuration could not be parsed or failed validation.
    #[error("invalid playground config: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ron::error::SpannedError> for SimError {
    fn from(err: ron::error::SpannedError) -> Self {
        SimError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = SimError::InvalidMass(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = SimError::BackendUnavailable("no adapter".into());
        assert_eq!(
            err.to_string(),
            "3D rendering backend unavailable: no adapter"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ron");
        let err: SimError = io.into();
        assert!(matches!(err, SimError::Io(_)));
    }
}
