//! Compile Options
//!
//! Everything a caller may tune without touching the conversion rules.
//! Every field has a default, so a partial JSON file is a valid config.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::blocks::DialectKind;
use crate::compiler::CompileError;
use crate::layout::FormField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub dialect: DialectKind,
    /// Prefix the output with the style block that hides the host theme's chrome.
    pub theme_override: bool,
    /// Height in px of the spacer between emitted sections; none for no spacer.
    pub section_spacing: Option<u32>,
    /// Drop `footer` sections; the site footer is published separately.
    pub skip_footer_sections: bool,
    pub contact: ContactDefaults,
}

impl CompileOptions {
    /// Core-block output for pasting into the editor.
    pub fn portable() -> Self {
        Self {
            dialect: DialectKind::Portable,
            theme_override: true,
            section_spacing: Some(30),
            skip_footer_sections: false,
            contact: ContactDefaults::default(),
        }
    }

    /// Page-builder output for published pages.
    pub fn native() -> Self {
        Self {
            dialect: DialectKind::Native,
            theme_override: false,
            section_spacing: None,
            skip_footer_sections: true,
            contact: ContactDefaults::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CompileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::portable()
    }
}

/// Recipient and wording for generated contact forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDefaults {
    pub email: Option<String>,
    pub subject: String,
    pub submit_label: String,
    /// Used when a layout's form names no fields.
    pub fields: Vec<FormField>,
}

impl Default for ContactDefaults {
    fn default() -> Self {
        Self {
            email: None,
            subject: "New enquiry from the website".to_string(),
            submit_label: "Send message".to_string(),
            fields: vec![
                FormField::new("Name", "text", true),
                FormField::new("Email", "email", true),
                FormField::new("Phone", "tel", false),
                FormField::new("Subject", "text", false),
                FormField::new("Message", "textarea", true),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let options = CompileOptions::from_json_str(r#"{"dialect": "native"}"#).unwrap();
        assert_eq!(options.dialect, DialectKind::Native);
        assert!(options.theme_override);
        assert_eq!(options.section_spacing, Some(30));
        assert_eq!(options.contact.fields.len(), 5);
    }

    #[test]
    fn test_presets_differ() {
        let portable = CompileOptions::portable();
        let native = CompileOptions::native();
        assert!(portable.theme_override && !native.theme_override);
        assert!(native.skip_footer_sections && !portable.skip_footer_sections);
        assert_eq!(native.section_spacing, None);
    }

    #[test]
    fn test_contact_override() {
        let options = CompileOptions::from_json_str(
            r#"{"contact": {"email": "post@example.com", "fields": [{"label": "Name"}]}}"#,
        )
        .unwrap();
        assert_eq!(options.contact.email.as_deref(), Some("post@example.com"));
        assert_eq!(options.contact.submit_label, "Send message");
        assert_eq!(options.contact.fields, vec![FormField::new("Name", "text", false)]);
    }
}
