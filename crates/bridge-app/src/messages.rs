//! User-facing notice texts
//!
//! Notices are looked up by [`MessageKey`] in a per-[`Locale`] table, with
//! optional per-key overrides from configuration. Templates use `{name}`
//! placeholders.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported notice languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ko => write!(f, "ko"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region-qualified tags like "ko-KR" or "en_US"
        let lang = s.split(['-', '_']).next().unwrap_or(s);
        match lang.to_ascii_lowercase().as_str() {
            "ko" => Ok(Locale::Ko),
            "en" => Ok(Locale::En),
            _ => Err(format!("unsupported locale: {}", s)),
        }
    }
}

/// Notice identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// No app handles the intent and there is no fallback URL
    AppNotInstalled,
    /// Decoding or launching failed; `{error}` holds the description
    LaunchFailed,
}

fn template(locale: Locale, key: MessageKey) -> &'static str {
    match (locale, key) {
        (Locale::Ko, MessageKey::AppNotInstalled) => "대상 앱이 설치되어 있지 않습니다.",
        (Locale::Ko, MessageKey::LaunchFailed) => "Intent 실행 중 오류 발생: {error}",
        (Locale::En, MessageKey::AppNotInstalled) => "The target app is not installed.",
        (Locale::En, MessageKey::LaunchFailed) => "Error while launching intent: {error}",
    }
}

/// Message table for one locale
#[derive(Debug, Clone, Default)]
pub struct Messages {
    locale: Locale,
    overrides: HashMap<MessageKey, String>,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            overrides: HashMap::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: HashMap<MessageKey, String>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Render `key`, substituting `{name}` placeholders from `args`
    pub fn render(&self, key: MessageKey, args: &[(&str, &str)]) -> String {
        let template = self
            .overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| template(self.locale, key));

        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_korean() {
        let messages = Messages::default();
        assert_eq!(messages.locale(), Locale::Ko);
        assert_eq!(
            messages.render(MessageKey::AppNotInstalled, &[]),
            "대상 앱이 설치되어 있지 않습니다."
        );
    }

    #[test]
    fn test_render_substitutes_error() {
        let messages = Messages::new(Locale::En);
        assert_eq!(
            messages.render(MessageKey::LaunchFailed, &[("error", "boom")]),
            "Error while launching intent: boom"
        );
        let ko = Messages::new(Locale::Ko);
        assert_eq!(
            ko.render(MessageKey::LaunchFailed, &[("error", "boom")]),
            "Intent 실행 중 오류 발생: boom"
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut overrides = HashMap::new();
        overrides.insert(
            MessageKey::AppNotInstalled,
            "카카오 앱이 설치되어 있지 않습니다.".to_string(),
        );
        let messages = Messages::new(Locale::Ko).with_overrides(overrides);
        assert_eq!(
            messages.render(MessageKey::AppNotInstalled, &[]),
            "카카오 앱이 설치되어 있지 않습니다."
        );
        assert!(messages
            .render(MessageKey::LaunchFailed, &[("error", "x")])
            .ends_with(": x"));
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("ko".parse::<Locale>().unwrap(), Locale::Ko);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("KO_kr".parse::<Locale>().unwrap(), Locale::Ko);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_message_key_serde_names() {
        let key: MessageKey = serde_json::from_str("\"app_not_installed\"").unwrap();
        assert_eq!(key, MessageKey::AppNotInstalled);
    }
}
