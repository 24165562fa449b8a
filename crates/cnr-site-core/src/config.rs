//! Site configuration.
//!
//! Every field has a default matching the stock page, so an absent or partial
//! `#site-config` block is fine.

use crate::error::SiteError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    #[serde(rename = "rootMargin", alias = "root_margin")]
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Back-to-top shows strictly above this scroll offset.
    pub back_to_top_offset: f64,
    /// Header switches to the raised shadow strictly above this offset.
    pub header_shadow_offset: f64,
    /// Used for anchor offsets when the page has no `#header`.
    pub fallback_header_height: f64,
    pub submit_delay_ms: u32,
    pub reveal: RevealConfig,
    /// `None` dispatches every scroll event.
    pub scroll_throttle_ms: Option<u32>,
    /// `None` reformats the phone field on every input event.
    pub phone_mask_debounce_ms: Option<u32>,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            back_to_top_offset: 300.0,
            header_shadow_offset: 10.0,
            fallback_header_height: 70.0,
            submit_delay_ms: 1500,
            reveal: RevealConfig::default(),
            scroll_throttle_ms: None,
            phone_mask_debounce_ms: None,
            log_level: "info".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config block.
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(SiteError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        for (name, value) in [
            ("back_to_top_offset", self.back_to_top_offset),
            ("header_shadow_offset", self.header_shadow_offset),
            ("fallback_header_height", self.fallback_header_height),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(SiteError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<tracing::Level, SiteError> {
        self.log_level
            .parse()
            .map_err(|_| SiteError::InvalidConfig(format!("unknown log level {:?}", self.log_level)))
    }
}
