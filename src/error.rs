//! The error type returned when parsing colors and identifiers from text.

use thiserror::Error;

/// Errors produced when text handed in by a caller does not name a valid value.
///
/// All numeric inputs are clamped instead, so parsing is the only fallible boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A color string was not `#RGB` or `#RRGGBB` hex.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// A color model name was not one of `hsb`, `hsl`, `lab`, or `cmyk`.
    #[error("unknown color model: {0:?}")]
    UnknownModel(String),

    /// A luminance zone name was not recognized.
    #[error("unknown luminance zone: {0:?}")]
    UnknownZone(String),

    /// A harmony scheme name was not recognized.
    #[error("unknown harmony scheme: {0:?}")]
    UnknownScheme(String),

    /// A color wheel name was not `rgb` or `ryb`.
    #[error("unknown color wheel: {0:?}")]
    UnknownWheel(String),

    /// A color vision name was not recognized.
    #[error("unknown color vision type: {0:?}")]
    UnknownVision(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_input() {
        let err = ParseError::UnknownScheme("tetradic".to_owned());
        let msg = err.to_string();
        assert!(msg.contains("tetradic"), "missing input in: {msg}");
        assert!(msg.contains("scheme"), "missing kind in: {msg}");

        let msg = ParseError::InvalidHex("#12".to_owned()).to_string();
        assert!(msg.contains("#12"), "missing input in: {msg}");
    }

    #[test]
    fn parse_error_is_send_sync_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ParseError>();
    }
}
