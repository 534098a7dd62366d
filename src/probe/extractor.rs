//! Profile page extractor
//!
//! Turns a fetched page into a display name and level, or reports that the
//! profile does not exist.

use crate::config::ExtractorConfig;
use crate::storage::UNKNOWN_FIELD;
use crate::ConfigError;
use scraper::{Html, Selector};

/// Fields extracted from an existing profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProfile {
    pub display_name: String,
    pub level: String,
}

/// Compiles a CSS selector, reporting failures as configuration errors
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Extracts profile fields from page HTML
///
/// Selectors are compiled once and shared read-only by every task.
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    not_found_marker: String,
    name_selector: Selector,
    level_selector: Selector,
    level_label: String,
}

impl ProfileExtractor {
    /// Creates an extractor from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ProfileExtractor)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector is invalid
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            not_found_marker: config.not_found_marker.clone(),
            name_selector: compile_selector(&config.name_selector)?,
            level_selector: compile_selector(&config.level_selector)?,
            level_label: config.level_label.clone(),
        })
    }

    /// Extracts a profile from page HTML
    ///
    /// # Rules
    ///
    /// 1. Page contains the not-found marker anywhere → `None`
    /// 2. Name: trimmed text of the first name element, `"Unknown"` if
    ///    missing or blank
    /// 3. Level: text of the first level element with the label removed and
    ///    trimmed, `"Unknown"` if missing or blank
    ///
    /// Never fails; malformed HTML degrades to `"Unknown"` fields.
    ///
    /// # Example
    ///
    /// ```
    /// use profile_sweep::config::ExtractorConfig;
    /// use profile_sweep::probe::ProfileExtractor;
    ///
    /// let extractor = ProfileExtractor::new(&ExtractorConfig::default()).unwrap();
    /// let html = r#"<span class="actual_persona_name">Alice</span>"#;
    /// let profile = extractor.extract(html).unwrap();
    /// assert_eq!(profile.display_name, "Alice");
    /// assert_eq!(profile.level, "Unknown");
    /// ```
    pub fn extract(&self, html: &str) -> Option<ExtractedProfile> {
        if html.contains(&self.not_found_marker) {
            return None;
        }

        let document = Html::parse_document(html);

        let display_name = first_text(&document, &self.name_selector)
            .map(|text| text.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

        let level = first_text(&document, &self.level_selector)
            .map(|text| self.strip_label(&text))
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

        Some(ExtractedProfile {
            display_name,
            level,
        })
    }

    fn strip_label(&self, text: &str) -> String {
        if self.level_label.is_empty() {
            text.trim().to_string()
        } else {
            text.replace(&self.level_label, "").trim().to_string()
        }
    }
}

/// Returns the concatenated text of the first element matching `selector`
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
}
