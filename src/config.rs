use std::time::Duration;

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DOUBLE_CLICK_MS, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH, MINIMIZE_DELAY_MS,
};
use crate::error::ConfigError;
use crate::gesture::ShakeConfig;
use crate::layout::{SnapConfig, Size};
use crate::window::ChromeLayout;

/// Tunables shared by the manager and every window it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopConfig {
    pub min_size: Size,
    pub default_size: Size,
    pub chrome: ChromeLayout,
    pub snap: SnapConfig,
    pub shake: ShakeConfig,
    /// Two title bar presses closer than this toggle maximize.
    pub double_click: Duration,
    /// Delay between the minimize button and the window leaving the desktop.
    pub minimize_delay: Duration,
    /// When set, shaking a window minimizes every other window, and shaking
    /// again brings them back.
    pub shake_minimizes_others: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            min_size: Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
            default_size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            chrome: ChromeLayout::default(),
            snap: SnapConfig::default(),
            shake: ShakeConfig::default(),
            double_click: Duration::from_millis(DOUBLE_CLICK_MS),
            minimize_delay: Duration::from_millis(MINIMIZE_DELAY_MS),
            shake_minimizes_others: true,
        }
    }
}

impl DesktopConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size.width <= 0 || self.min_size.height <= 0 {
            return Err(ConfigError::MinimumSize {
                width: self.min_size.width,
                height: self.min_size.height,
            });
        }
        if self.default_size.width < self.min_size.width
            || self.default_size.height < self.min_size.height
        {
            return Err(ConfigError::DefaultBelowMinimum {
                width: self.default_size.width,
                height: self.default_size.height,
                min_width: self.min_size.width,
                min_height: self.min_size.height,
            });
        }
        if self.chrome.title_bar_height <= 0 {
            return Err(ConfigError::TitleBar(self.chrome.title_bar_height));
        }
        if self.snap.edge_margin < 0 || self.snap.corner_margin < 0 {
            return Err(ConfigError::SnapMargins {
                edge: self.snap.edge_margin,
                corner: self.snap.corner_margin,
            });
        }
        if self.shake.min_samples < 2 || self.shake.reversals == 0 {
            return Err(ConfigError::ShakeThresholds);
        }
        Ok(())
    }
}
