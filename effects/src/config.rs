//! Tunables for every controller.
//!
//! Defaults reproduce the production page. A page may override any subset by
//! embedding a JSON object; missing fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::timer::Millis;

const DEFAULT_NAV_OFFSET_PX: f64 = 80.0;
const DEFAULT_SCROLLED_THRESHOLD_PX: f64 = 100.0;
const DEFAULT_HIDE_THRESHOLD_PX: f64 = 200.0;
const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
const DEFAULT_INDICATOR_FADE_PX: f64 = 300.0;
const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;
const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

const DEFAULT_ROTATION_INTERVAL_MS: Millis = 15_000;
const DEFAULT_ROTATION_JITTER_MS: Millis = 2_000;
const DEFAULT_SPECIAL_DURATION_MS: Millis = 3_000;
const DEFAULT_DISHES: [&str; 4] = ["Malabar Biryani", "Mango Fish Curry", "Kerala Banana Fritters", "Ada Pradhaman"];

const DEFAULT_BOOKING_DELAY_MS: Millis = 1_500;
const DEFAULT_WHATSAPP_NUMBER: &str = "+919334529892";
const DEFAULT_BOOKING_MESSAGE: &str = "Hi! I would like to book a consultation for catering services.";

const DEFAULT_NEWSLETTER_DELAY_MS: Millis = 30_000;
const DEFAULT_NEWSLETTER_STORAGE_KEY: &str = "newsletter_shown";

const DEFAULT_TOAST_SHOW_DELAY_MS: Millis = 100;
const DEFAULT_TOAST_VISIBLE_MS: Millis = 3_000;
const DEFAULT_TOAST_EXIT_MS: Millis = 300;

const DEFAULT_RIPPLE_MS: Millis = 600;
const DEFAULT_TYPEWRITER_START_MS: Millis = 1_000;
const DEFAULT_TYPEWRITER_CHAR_MS: Millis = 100;
const DEFAULT_TYPEWRITER_FOLLOW_MS: Millis = 500;
const DEFAULT_SOCIAL_BOUNCE_STEP_MS: Millis = 200;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dish list is empty")]
    NoDishes,
    #[error("whatsapp number is empty")]
    NoPhoneNumber,
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Space kept above a scroll target for the fixed header.
    pub nav_offset_px: f64,
    pub scrolled_threshold_px: f64,
    /// Below this offset the navbar never hides on scroll.
    pub hide_threshold_px: f64,
    pub parallax_speed: f64,
    /// Scroll distance over which the indicator fades out.
    pub indicator_fade_px: f64,
    pub mobile_breakpoint_px: f64,
    pub swipe_threshold_px: f64,

    pub rotation_interval_ms: Millis,
    /// Upper bound (exclusive) of the random delay before a special shows.
    pub rotation_jitter_ms: Millis,
    pub special_duration_ms: Millis,
    pub dishes: Vec<String>,

    pub booking_delay_ms: Millis,
    pub whatsapp_number: String,
    pub booking_message: String,

    pub newsletter_delay_ms: Millis,
    pub newsletter_storage_key: String,

    pub toast_show_delay_ms: Millis,
    pub toast_visible_ms: Millis,
    pub toast_exit_ms: Millis,

    pub ripple_ms: Millis,
    pub typewriter_start_ms: Millis,
    pub typewriter_char_ms: Millis,
    pub typewriter_follow_ms: Millis,
    pub social_bounce_step_ms: Millis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nav_offset_px: DEFAULT_NAV_OFFSET_PX,
            scrolled_threshold_px: DEFAULT_SCROLLED_THRESHOLD_PX,
            hide_threshold_px: DEFAULT_HIDE_THRESHOLD_PX,
            parallax_speed: DEFAULT_PARALLAX_SPEED,
            indicator_fade_px: DEFAULT_INDICATOR_FADE_PX,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            rotation_interval_ms: DEFAULT_ROTATION_INTERVAL_MS,
            rotation_jitter_ms: DEFAULT_ROTATION_JITTER_MS,
            special_duration_ms: DEFAULT_SPECIAL_DURATION_MS,
            dishes: DEFAULT_DISHES.iter().map(ToString::to_string).collect(),
            booking_delay_ms: DEFAULT_BOOKING_DELAY_MS,
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_owned(),
            booking_message: DEFAULT_BOOKING_MESSAGE.to_owned(),
            newsletter_delay_ms: DEFAULT_NEWSLETTER_DELAY_MS,
            newsletter_storage_key: DEFAULT_NEWSLETTER_STORAGE_KEY.to_owned(),
            toast_show_delay_ms: DEFAULT_TOAST_SHOW_DELAY_MS,
            toast_visible_ms: DEFAULT_TOAST_VISIBLE_MS,
            toast_exit_ms: DEFAULT_TOAST_EXIT_MS,
            ripple_ms: DEFAULT_RIPPLE_MS,
            typewriter_start_ms: DEFAULT_TYPEWRITER_START_MS,
            typewriter_char_ms: DEFAULT_TYPEWRITER_CHAR_MS,
            typewriter_follow_ms: DEFAULT_TYPEWRITER_FOLLOW_MS,
            social_bounce_step_ms: DEFAULT_SOCIAL_BOUNCE_STEP_MS,
        }
    }
}

impl Config {
    /// Parse a JSON override object and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dishes.is_empty() {
            return Err(ConfigError::NoDishes);
        }
        if self.whatsapp_number.trim().is_empty() {
            return Err(ConfigError::NoPhoneNumber);
        }
        let lengths = [
            ("indicator_fade_px", self.indicator_fade_px),
            ("mobile_breakpoint_px", self.mobile_breakpoint_px),
            ("swipe_threshold_px", self.swipe_threshold_px),
        ];
        for (field, value) in lengths {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        let timings = [
            ("rotation_interval_ms", self.rotation_interval_ms),
            ("special_duration_ms", self.special_duration_ms),
            ("typewriter_char_ms", self.typewriter_char_ms),
        ];
        for (field, value) in timings {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        Ok(())
    }

    /// The booking deep link with the message URL-encoded.
    #[must_use]
    pub fn booking_url(&self) -> String {
        format!("https://wa.me/{}?text={}", self.whatsapp_number, urlencoding::encode(&self.booking_message))
    }
}
