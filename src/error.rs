use std::io;

use thiserror::Error;

use crate::window::Size;

/// Rejected [`DeskConfig`](crate::config::DeskConfig) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cascade slot count must be at least 1")]
    ZeroCascadeSlots,
    #[error("minimum window size must be non-zero, got {0:?}")]
    ZeroMinimumSize(Size),
    #[error("default window size {default:?} is smaller than the minimum {min:?}")]
    DefaultBelowMinimum { default: Size, min: Size },
}

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_and_displays() {
        let err: DeskError = ConfigError::ZeroCascadeSlots.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: cascade slot count must be at least 1"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: DeskError = io::Error::other("boom").into();
        assert!(matches!(err, DeskError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
