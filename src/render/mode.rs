//! Render mode detection
//!
//! Picks box-drawing glyphs when the terminal handles Unicode, plain ASCII
//! otherwise.

use std::env;

/// Available rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Classic ASCII characters (# + . etc.)
    #[default]
    Ascii,

    /// Box-drawing walls and Unicode floor marks
    Unicode,
}

impl RenderMode {
    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ASCII",
            RenderMode::Unicode => "Unicode",
        }
    }
}

/// Detect the best rendering mode for the current terminal
pub fn detect_render_mode() -> RenderMode {
    if is_unicode_supported() {
        log::info!("Using Unicode rendering mode");
        return RenderMode::Unicode;
    }

    log::info!("Falling back to ASCII rendering mode");
    RenderMode::Ascii
}

/// Check whether the locale advertises UTF-8
fn is_unicode_supported() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .map_or(false, |value| {
            let upper = value.to_uppercase();
            upper.contains("UTF-8") || upper.contains("UTF8")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(RenderMode::default(), RenderMode::Ascii);
        assert_eq!(RenderMode::Unicode.name(), "Unicode");
    }
}
