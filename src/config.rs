//! Viewer configuration
//!
//! Plain defaults with builder-style overrides, plus a small set of
//! environment variables for the knobs worth changing without a rebuild.

use log::warn;

/// Environment variable that disables vsync when set to `0` or `false`
pub const VSYNC_ENV: &str = "HOUSE_VSYNC";
/// Environment variable holding the requested MSAA sample count
pub const MSAA_ENV: &str = "HOUSE_MSAA";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in logical pixels
    pub window_size: (u32, u32),
    /// Present in step with the display refresh
    pub vsync: bool,
    /// Requested MSAA sample count; falls back to 1 when the adapter
    /// cannot multisample the surface format
    pub msaa_samples: u32,
    pub ui_font_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "House Viewer".to_string(),
            window_size: (1200, 800),
            vsync: true,
            msaa_samples: 4,
            ui_font_size: 18.0,
        }
    }
}

impl ViewerConfig {
    /// Defaults with overrides read from the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(VSYNC_ENV) {
            match parse_flag(&value) {
                Some(flag) => self.vsync = flag,
                None => warn!("Ignoring {}={:?}: expected a boolean", VSYNC_ENV, value),
            }
        }

        if let Some(value) = lookup(MSAA_ENV) {
            match value.trim().parse::<u32>() {
                Ok(samples) if matches!(samples, 1 | 2 | 4 | 8) => self.msaa_samples = samples,
                _ => warn!("Ignoring {}={:?}: expected 1, 2, 4 or 8", MSAA_ENV, value),
            }
        }

        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_msaa_samples(mut self, samples: u32) -> Self {
        self.msaa_samples = samples.max(1);
        self
    }

    pub fn with_ui_font_size(mut self, size: f32) -> Self {
        self.ui_font_size = size;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
