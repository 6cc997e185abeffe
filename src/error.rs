use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the hard-disk simulation core.
///
/// Every failure here is a precondition violation rather than a transient
/// fault; callers should not retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Numerical or geometric issue (e.g., degenerate contact normal).
    #[error("numerical error: {0}")]
    MathError(String),

    /// No candidate event exists: every disk has zero velocity, so the
    /// system would never change again.
    #[error("simulation stalled: no wall or pair event can occur")]
    Stalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("sigma must be in (0, 0.5)".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("sigma"));
    }

    #[test]
    fn stalled_display_mentions_events() {
        let msg = format!("{}", Error::Stalled);
        assert!(msg.contains("stalled"));
    }
}
