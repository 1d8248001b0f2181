//! Error types for chartdraw

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DrawError>;

/// Main error type for chartdraw
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("No current path: call new_path() first")]
    NoCurrentPath,

    #[error("No current point: the path has no segment to extend")]
    NoCurrentPoint,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(#[from] StyleError),

    #[error("Program finished with {open} scope(s) still open")]
    UnbalancedScope { open: usize },

    #[error("exit_scope() called with no open scope")]
    ScopeUnderflow,

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A style value that breaks one of its invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("line width must be non-negative, got {0}")]
    NegativeWidth(f64),

    #[error("dash lengths must be non-negative, got {0}")]
    NegativeDash(f64),

    #[error("font size must be positive, got {0}")]
    NonPositiveFontSize(f64),

    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("polygon markers need at least 3 vertices, got {0}")]
    TooFewVertices(u32),

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Font resolution and measurement errors
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Glyph missing for {0:?}")]
    MissingGlyph(char),

    #[error("Font backend error: {0}")]
    Backend(String),
}

/// Surface and output errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Path building failed")]
    PathBuilding,

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_error_converts() {
        let err: DrawError = StyleError::NegativeRadius(-1.0).into();
        assert!(matches!(err, DrawError::InvalidStyle(StyleError::NegativeRadius(_))));
        assert_eq!(
            err.to_string(),
            "Invalid style: radius must be non-negative, got -1"
        );
    }

    #[test]
    fn test_font_error_message() {
        let err: DrawError = FontError::NotFound("Nope Sans".into()).into();
        assert_eq!(err.to_string(), "Font error: Font not found: Nope Sans");
    }
}
