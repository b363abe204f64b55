//! crates/seo_writer_core/src/settings.rs
//!
//! The user settings record and its JSON export/import format.

use serde::{Deserialize, Serialize};

use crate::domain::{Language, TargetWordCount, Tone};
use crate::error::{CoreError, CoreResult};

/// Name offered for downloaded settings files.
pub const EXPORT_FILENAME: &str = "seo-writer-settings.json";
const REDACTED_TAIL: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

/// Every field is required on import; there is no partial form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub api_key: String,
    pub default_language: Language,
    pub default_tone: Tone,
    pub default_word_count: TargetWordCount,
    pub theme: Theme,
    pub email_notifications: bool,
    pub auto_save: bool,
    pub show_seo_tips: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            bio: String::new(),
            api_key: String::new(),
            default_language: Language::English,
            default_tone: Tone::Professional,
            default_word_count: TargetWordCount::Words1000,
            theme: Theme::Light,
            email_notifications: true,
            auto_save: true,
            show_seo_tips: true,
        }
    }
}

impl Settings {
    /// Parses an exported settings document. Anything other than the exact
    /// record shape is an `ImportFormat` error.
    pub fn import(text: &str) -> CoreResult<Self> {
        let settings: Settings = serde_json::from_str(text)
            .map_err(|e| CoreError::ImportFormat(e.to_string()))?;
        settings
            .validate()
            .map_err(|e| CoreError::ImportFormat(e.to_string()))?;
        Ok(settings)
    }

    pub fn export(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Internal(e.to_string()))
    }

    pub fn validate(&self) -> CoreResult<()> {
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(CoreError::Validation(format!("'{email}' is not an email address")));
        }
        Ok(())
    }

    /// A copy safe to show: the API key keeps only its last four characters.
    /// Keys too short to keep a tail are masked whole.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let chars: Vec<char> = copy.api_key.chars().collect();
        copy.api_key = match chars.len() {
            0 => String::new(),
            1..=REDACTED_TAIL => "****".to_string(),
            len => format!("****{}", chars[len - REDACTED_TAIL..].iter().collect::<String>()),
        };
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_is_lossless() {
        let settings = Settings {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            bio: "Content writer".into(),
            api_key: "sk-test-1234".into(),
            default_language: Language::German,
            default_tone: Tone::Friendly,
            default_word_count: TargetWordCount::Words1500,
            theme: Theme::System,
            email_notifications: false,
            auto_save: true,
            show_seo_tips: false,
        };
        let text = settings.export().unwrap();
        assert!(text.contains("\"defaultWordCount\": 1500"));
        assert_eq!(Settings::import(&text).unwrap(), settings);
    }

    #[test]
    fn import_rejects_unknown_or_missing_fields() {
        let mut value = serde_json::to_value(Settings::default()).unwrap();
        value["favouriteColour"] = "green".into();
        let err = Settings::import(&value.to_string()).unwrap_err();
        assert!(matches!(err, CoreError::ImportFormat(_)));

        let mut value = serde_json::to_value(Settings::default()).unwrap();
        value.as_object_mut().unwrap().remove("theme");
        assert!(matches!(Settings::import(&value.to_string()), Err(CoreError::ImportFormat(_))));
    }

    #[test]
    fn import_rejects_values_outside_the_option_set() {
        let mut value = serde_json::to_value(Settings::default()).unwrap();
        value["defaultWordCount"] = 1234.into();
        assert!(Settings::import(&value.to_string()).is_err());

        let mut value = serde_json::to_value(Settings::default()).unwrap();
        value["theme"] = "sepia".into();
        assert!(Settings::import(&value.to_string()).is_err());

        let mut value = serde_json::to_value(Settings::default()).unwrap();
        value["email"] = "not-an-email".into();
        assert!(matches!(Settings::import(&value.to_string()), Err(CoreError::ImportFormat(_))));

        assert!(Settings::import("not json").is_err());
    }

    #[test]
    fn redaction_keeps_last_four() {
        let settings = Settings {
            api_key: "sk-abcdefgh".into(),
            ..Settings::default()
        };
        assert_eq!(settings.redacted().api_key, "****efgh");
        assert_eq!(Settings::default().redacted().api_key, "");
    }

    #[test]
    fn short_keys_are_masked_whole() {
        for key in ["k", "abcd"] {
            let settings = Settings {
                api_key: key.into(),
                ..Settings::default()
            };
            assert_eq!(settings.redacted().api_key, "****");
        }
        let five = Settings {
            api_key: "abcde".into(),
            ..Settings::default()
        };
        assert_eq!(five.redacted().api_key, "****bcde");
    }
}
