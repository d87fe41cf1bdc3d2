use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "page-behavior-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Local builds get the per-feature wiring logs
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub slider_interval_ms: u32,
    /// Height of the fixed header, subtracted from smooth-scroll targets.
    pub scroll_offset: f64,
    /// Extra look-ahead added to the scroll-spy probe point.
    pub spy_lead: f64,
    pub spy_throttle_ms: u32,
    pub counter_duration_ms: f64,
    pub counter_threshold: f64,
    pub counter_root_margin: String,
    pub parallax_factor: f64,
    pub form_delay_ms: u32,
    pub testimonial_interval_ms: u32,
    pub sending_label: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            slider_interval_ms: 5000,
            scroll_offset: 80.0,
            spy_lead: 150.0,
            spy_throttle_ms: 100,
            counter_duration_ms: 2000.0,
            counter_threshold: 0.3,
            counter_root_margin: "0px 0px -50px 0px".to_string(),
            parallax_factor: 0.3,
            form_delay_ms: 1000,
            testimonial_interval_ms: 5000,
            sending_label: "Sending...".to_string(),
            success_message: "Thank you for your message! We will get back to you as soon as possible."
                .to_string(),
            failure_message: "Something went wrong. Please try again later.".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the page, falling back to defaults when the block
    /// is absent or malformed.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring page config: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Scroll-spy probe point for the given vertical scroll position.
    pub fn spy_probe(&self, scroll_y: f64) -> f64 {
        scroll_y + self.scroll_offset + self.spy_lead
    }
}
