//! Configuration types for Folio
//!
//! Every timing, threshold and selector the page behavior depends on lives
//! here. The browser crate reads optional overrides from `window.FOLIO_CONFIG`;
//! missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioConfig {
    /// Minimum time the preloader stays on screen, in milliseconds
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u32,

    /// Duration of the counter count-up, in milliseconds
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u32,

    /// Fraction of a section that must be visible before it is revealed
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub navbar: NavbarConfig,

    /// Scroll offset past which the scroll-to-top button is shown
    #[serde(default = "default_scroll_top_offset")]
    pub scroll_top_offset: f64,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    /// File name suggested for the downloaded CV
    #[serde(default = "default_cv_file_name")]
    pub cv_file_name: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            min_display_ms: default_min_display_ms(),
            counter_duration_ms: default_counter_duration_ms(),
            reveal_threshold: default_reveal_threshold(),
            selectors: SelectorConfig::default(),
            navbar: NavbarConfig::default(),
            scroll_top_offset: default_scroll_top_offset(),
            filter: FilterConfig::default(),
            contact: ContactConfig::default(),
            cv_file_name: default_cv_file_name(),
        }
    }
}

impl FolioConfig {
    /// Reject values the behavior cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(FolioError::Config(format!(
                "revealThreshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if self.counter_duration_ms == 0 {
            return Err(FolioError::Config(
                "counterDurationMs must be greater than zero".to_string(),
            ));
        }
        if self.contact.storage_key.trim().is_empty() {
            return Err(FolioError::Config(
                "contact.storageKey must not be empty".to_string(),
            ));
        }
        if self.navbar.compact_offset > self.navbar.hide_offset {
            return Err(FolioError::Config(format!(
                "navbar.compactOffset ({}) exceeds navbar.hideOffset ({})",
                self.navbar.compact_offset, self.navbar.hide_offset
            )));
        }
        Ok(())
    }
}

/// CSS selectors for the elements the behavior attaches to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectorConfig {
    pub preloader: String,
    pub navbar: String,
    pub hero_image: String,
    pub hero_info: String,
    pub sections: String,
    pub counters: String,
    /// Attribute holding a counter's target value
    pub counter_target_attribute: String,
    pub nav_collapse: String,
    pub nav_links: String,
    pub scroll_top_button: String,
    pub contact_form: String,
    pub project_tabs: String,
    pub project_items: String,
    pub default_project_pane: String,
    pub cv_link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            preloader: "#preloader".to_string(),
            navbar: ".navbar".to_string(),
            hero_image: ".img-inner".to_string(),
            hero_info: ".info".to_string(),
            sections: "section, main".to_string(),
            counters: ".counter".to_string(),
            counter_target_attribute: "data-target".to_string(),
            nav_collapse: "#navbarSupportedContent".to_string(),
            nav_links: ".navbar-nav .nav-link".to_string(),
            scroll_top_button: "#scrollTopBtn".to_string(),
            contact_form: "#contactForm".to_string(),
            project_tabs: "[data-bs-toggle=\"pill\"]".to_string(),
            project_items: ".project-item".to_string(),
            default_project_pane: "#pills-all".to_string(),
            cv_link: ".dCV".to_string(),
        }
    }
}

/// Navbar scroll thresholds, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarConfig {
    /// Up to this offset the navbar uses its compact scrolled style
    pub compact_offset: f64,
    /// Past this offset the navbar hides while scrolling down
    pub hide_offset: f64,
    /// Scroll spy look-ahead subtracted from each section's top
    pub spy_offset: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            compact_offset: 100.0,
            hide_offset: 800.0,
            spy_offset: 120.0,
        }
    }
}

/// Project tab switch timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    /// Delay between hiding the old items and revealing the new pane
    pub switch_delay_ms: u32,
    /// Delay between consecutive item reveals
    pub stagger_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            switch_delay_ms: 400,
            stagger_ms: 100,
        }
    }
}

/// Contact form persistence and feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactConfig {
    /// Local storage key of the submission log
    pub storage_key: String,
    /// How long the success banner stays visible
    pub success_clear_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            storage_key: "contactFormData".to_string(),
            success_clear_ms: 3000,
        }
    }
}

fn default_min_display_ms() -> u32 {
    3000
}

fn default_counter_duration_ms() -> u32 {
    1500
}

fn default_reveal_threshold() -> f64 {
    0.2
}

fn default_scroll_top_offset() -> f64 {
    400.0
}

fn default_cv_file_name() -> String {
    "CV.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.min_display_ms, 3000);
        assert_eq!(config.counter_duration_ms, 1500);
        assert_eq!(config.reveal_threshold, 0.2);
        assert_eq!(config.selectors.sections, "section, main");
        assert_eq!(config.contact.storage_key, "contactFormData");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_empty_object() {
        let config: FolioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_deserialize_partial_overrides() {
        let json = r##"{
            "minDisplayMs": 1000,
            "selectors": { "preloader": "#loader" },
            "navbar": { "hideOffset": 600 }
        }"##;
        let config: FolioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.min_display_ms, 1000);
        assert_eq!(config.selectors.preloader, "#loader");
        assert_eq!(config.selectors.navbar, ".navbar");
        assert_eq!(config.navbar.hide_offset, 600.0);
        assert_eq!(config.navbar.compact_offset, 100.0);
    }

    #[test]
    fn test_validate_rejects_threshold_out_of_range() {
        let config = FolioConfig {
            reveal_threshold: 1.5,
            ..FolioConfig::default()
        };
        assert!(matches!(config.validate(), Err(FolioError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_counter_duration() {
        let config = FolioConfig {
            counter_duration_ms: 0,
            ..FolioConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_navbar_offsets() {
        let mut config = FolioConfig::default();
        config.navbar.compact_offset = 900.0;
        assert!(config.validate().is_err());
    }
}
