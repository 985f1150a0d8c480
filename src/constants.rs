//! Application-wide constants
//!
//! Timings, parameter ranges and the fixed status texts shown to the user.

/// Apply/reset timing defaults
pub mod timing {
    /// Quiet period after the last slider tick before settings are applied
    pub const DEBOUNCE_MS: u64 = 250;

    /// Deadline for a single external tool invocation
    pub const TOOL_TIMEOUT_MS: u64 = 3000;
}

/// External tool defaults
pub mod tool {
    /// Program invoked for every apply/reset
    pub const DEFAULT_PROGRAM: &str = "redshift";

    /// Adjustment backend forced with `-m`
    pub const DEFAULT_METHOD: &str = "randr";
}

/// Parameter ranges and defaults
pub mod params {
    pub const TEMPERATURE_MIN: f64 = 1000.0;
    pub const TEMPERATURE_MAX: f64 = 10000.0;
    pub const TEMPERATURE_STEP: f64 = 100.0;
    pub const TEMPERATURE_DEFAULT: f64 = 6500.0;

    pub const BRIGHTNESS_MIN: f64 = 0.10;
    pub const BRIGHTNESS_MAX: f64 = 1.00;
    pub const BRIGHTNESS_STEP: f64 = 0.01;
    pub const BRIGHTNESS_DEFAULT: f64 = 1.00;

    pub const GAMMA_MIN: f64 = 0.50;
    pub const GAMMA_MAX: f64 = 2.50;
    pub const GAMMA_STEP: f64 = 0.01;
    pub const GAMMA_DEFAULT: f64 = 1.00;
}

/// Status line texts
pub mod status {
    pub const READY: &str = "Ready.";
    pub const APPLIED: &str = "Applied";
    pub const RESET_DONE: &str = "Reset to defaults";
    pub const APPLY_TIMED_OUT: &str = "Timed out applying settings";
    pub const RESET_TIMED_OUT: &str = "Timed out resetting settings";

    /// Error prefix used for reset failures (apply failures use the tool name)
    pub const RESET_MODE: &str = "reset";
}

/// Config file location
pub mod config {
    /// Directory under the XDG config dir
    pub const APP_DIR: &str = "screen-dimmer";

    pub const FILENAME: &str = "config.json";
}
