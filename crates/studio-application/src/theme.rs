//! Theme mirroring.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Presentation-side receiver of `settings.isDarkMode`.
pub trait ThemeSink: Send + Sync {
    fn apply(&self, is_dark_mode: bool);
}

/// A shared dark-mode flag, the native stand-in for a document theme class.
#[derive(Debug, Clone, Default)]
pub struct ThemeFlag {
    dark: Arc<AtomicBool>,
}

impl ThemeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Acquire)
    }
}

impl ThemeSink for ThemeFlag {
    fn apply(&self, is_dark_mode: bool) {
        let previous = self.dark.swap(is_dark_mode, Ordering::AcqRel);
        if previous != is_dark_mode {
            tracing::debug!(dark = is_dark_mode, "Theme changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_clones_share_value() {
        let flag = ThemeFlag::new();
        let view = flag.clone();
        assert!(!view.is_dark());

        flag.apply(true);
        assert!(view.is_dark());
        flag.apply(false);
        assert!(!view.is_dark());
    }
}
