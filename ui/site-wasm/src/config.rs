//! Reads the optional inline `#site-config` JSON block.

use crate::dom;
use cnr_site_core::SiteConfig;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Config from the page, or defaults when the block is absent or invalid.
/// Runs before logging is set up, so problems go straight to the console.
pub fn load() -> SiteConfig {
    let Some(raw) = dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::warn!(format!("ignoring #{CONFIG_ELEMENT_ID}: {err}"));
            SiteConfig::default()
        }
    }
}
