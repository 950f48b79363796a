//! Intent domain types
//!
//! An [`Intent`] is the action descriptor decoded from a URL: what the host
//! should do (`action`), on what (`data`), and for whom (`package` /
//! `component`), plus typed extras.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard "view" action, the default for every decoded intent
pub const ACTION_VIEW: &str = "android.intent.action.VIEW";

/// Extra key carrying the browser URL to open when no app can handle the intent
pub const EXTRA_BROWSER_FALLBACK_URL: &str = "browser_fallback_url";

// ─────────────────────────────────────────────────────────────────────────────
// ComponentName
// ─────────────────────────────────────────────────────────────────────────────

/// Fully qualified activity name (`package/class`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Parse `pkg/cls`. A class starting with `.` is relative to the package.
    ///
    /// Returns `None` when there is no `/` separator.
    pub fn unflatten(s: &str) -> Option<Self> {
        let (package, class) = s.split_once('/')?;
        if package.is_empty() || class.is_empty() {
            return None;
        }
        let class = if class.starts_with('.') {
            format!("{}{}", package, class)
        } else {
            class.to_string()
        };
        Some(Self::new(package, class))
    }

    /// Format as `pkg/cls`, shortening the class when it lives in the package.
    pub fn flatten_short(&self) -> String {
        match self.class.strip_prefix(&self.package) {
            Some(rest) if rest.starts_with('.') => format!("{}/{}", self.package, rest),
            _ => format!("{}/{}", self.package, self.class),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extra
// ─────────────────────────────────────────────────────────────────────────────

/// Typed extra value carried by an intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Extra {
    String(String),
    Bool(bool),
    Byte(i8),
    Char(char),
    Double(f64),
    Float(f32),
    Int(i32),
    Long(i64),
    Short(i16),
}

impl Extra {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Extra::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extra::String(v) => write!(f, "{}", v),
            Extra::Bool(v) => write!(f, "{}", v),
            Extra::Byte(v) => write!(f, "{}", v),
            Extra::Char(v) => write!(f, "{}", v),
            Extra::Double(v) => write!(f, "{}", v),
            Extra::Float(v) => write!(f, "{}", v),
            Extra::Int(v) => write!(f, "{}", v),
            Extra::Long(v) => write!(f, "{}", v),
            Extra::Short(v) => write!(f, "{}", v),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intent
// ─────────────────────────────────────────────────────────────────────────────

/// Action descriptor decoded from a URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub action: String,

    /// Data URI. Not necessarily absolute (`intent://host/` without a
    /// `scheme=` entry decodes to `//host/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentName>,

    #[serde(default)]
    pub launch_flags: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_bounds: Option<String>,

    /// Insertion-ordered extras; later duplicates replace earlier values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<(String, Extra)>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Box<Intent>>,
}

impl Default for Intent {
    fn default() -> Self {
        Self::new(ACTION_VIEW)
    }
}

impl Intent {
    /// Create an intent with the given action and nothing else set
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            data: None,
            categories: Vec::new(),
            mime_type: None,
            identifier: None,
            package: None,
            component: None,
            launch_flags: 0,
            source_bounds: None,
            extras: Vec::new(),
            selector: None,
        }
    }

    /// Plain view action for a URL (used for browser fallbacks)
    pub fn view(url: impl Into<String>) -> Self {
        Self {
            data: Some(url.into()),
            ..Self::new(ACTION_VIEW)
        }
    }

    /// Add a category, ignoring duplicates
    pub fn add_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    /// Insert or replace an extra
    pub fn put_extra(&mut self, key: impl Into<String>, value: Extra) {
        let key = key.into();
        match self.extras.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.extras.push((key, value)),
        }
    }

    pub fn extra(&self, key: &str) -> Option<&Extra> {
        self.extras.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String extra lookup. Non-string extras with the same key yield `None`.
    pub fn string_extra(&self, key: &str) -> Option<&str> {
        self.extra(key).and_then(Extra::as_str)
    }

    /// The `browser_fallback_url` extra, if present and non-empty
    pub fn browser_fallback_url(&self) -> Option<&str> {
        self.string_extra(EXTRA_BROWSER_FALLBACK_URL)
            .filter(|url| !url.trim().is_empty())
    }

    /// Package the intent is addressed to, either directly or via its component
    pub fn target_package(&self) -> Option<&str> {
        self.package
            .as_deref()
            .or_else(|| self.component.as_ref().map(|c| c.package.as_str()))
    }

    /// Scheme of the data URI, lowercased
    pub fn data_scheme(&self) -> Option<String> {
        let data = self.data.as_deref()?;
        let (scheme, _) = data.split_once(':')?;
        let valid = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then(|| scheme.to_ascii_lowercase())
    }

    /// One-line description for logs and notices
    pub fn summary(&self) -> String {
        let mut parts = vec![self.action.clone()];
        if let Some(data) = &self.data {
            parts.push(format!("data={}", data));
        }
        if let Some(component) = &self.component {
            parts.push(format!("cmp={}", component.flatten_short()));
        } else if let Some(package) = &self.package {
            parts.push(format!("pkg={}", package));
        }
        if !self.extras.is_empty() {
            parts.push(format!("extras={}", self.extras.len()));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_intent() {
        let intent = Intent::view("https://example.com");
        assert_eq!(intent.action, ACTION_VIEW);
        assert_eq!(intent.data.as_deref(), Some("https://example.com"));
        assert!(intent.package.is_none());
        assert!(intent.extras.is_empty());
    }

    #[test]
    fn test_component_unflatten_relative_class() {
        let cmp = ComponentName::unflatten("com.kakao.talk/.activity.SplashActivity").unwrap();
        assert_eq!(cmp.package, "com.kakao.talk");
        assert_eq!(cmp.class, "com.kakao.talk.activity.SplashActivity");
        assert_eq!(cmp.flatten_short(), "com.kakao.talk/.activity.SplashActivity");
    }

    #[test]
    fn test_component_unflatten_absolute_class() {
        let cmp = ComponentName::unflatten("com.a/org.b.Main").unwrap();
        assert_eq!(cmp.class, "org.b.Main");
        assert_eq!(cmp.to_string(), "com.a/org.b.Main");
    }

    #[test]
    fn test_component_unflatten_rejects_missing_separator() {
        assert!(ComponentName::unflatten("com.kakao.talk").is_none());
        assert!(ComponentName::unflatten("/Main").is_none());
    }

    #[test]
    fn test_put_extra_replaces_existing_key() {
        let mut intent = Intent::default();
        intent.put_extra("k", Extra::Int(1));
        intent.put_extra("k", Extra::String("two".into()));
        assert_eq!(intent.extras.len(), 1);
        assert_eq!(intent.string_extra("k"), Some("two"));
    }

    #[test]
    fn test_string_extra_ignores_other_types() {
        let mut intent = Intent::default();
        intent.put_extra(EXTRA_BROWSER_FALLBACK_URL, Extra::Bool(true));
        assert!(intent.string_extra(EXTRA_BROWSER_FALLBACK_URL).is_none());
        assert!(intent.browser_fallback_url().is_none());
    }

    #[test]
    fn test_browser_fallback_url_empty_is_absent() {
        let mut intent = Intent::default();
        intent.put_extra(EXTRA_BROWSER_FALLBACK_URL, Extra::String(String::new()));
        assert!(intent.browser_fallback_url().is_none());
    }

    #[test]
    fn test_target_package_prefers_package() {
        let mut intent = Intent::default();
        intent.component = Some(ComponentName::new("com.b", "com.b.Main"));
        assert_eq!(intent.target_package(), Some("com.b"));
        intent.package = Some("com.a".into());
        assert_eq!(intent.target_package(), Some("com.a"));
    }

    #[test]
    fn test_data_scheme() {
        assert_eq!(Intent::view("HTTPS://x").data_scheme().as_deref(), Some("https"));
        assert_eq!(Intent::view("kakaolink://send").data_scheme().as_deref(), Some("kakaolink"));
        assert!(Intent::view("//example/").data_scheme().is_none());
        assert!(Intent::default().data_scheme().is_none());
    }

    #[test]
    fn test_categories_deduplicate() {
        let mut intent = Intent::default();
        intent.add_category("android.intent.category.BROWSABLE");
        intent.add_category("android.intent.category.BROWSABLE");
        assert_eq!(intent.categories.len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut intent = Intent::view("https://example.com");
        intent.package = Some("com.kakao.talk".into());
        intent.put_extra("a", Extra::Int(1));
        assert_eq!(
            intent.summary(),
            "android.intent.action.VIEW data=https://example.com pkg=com.kakao.talk extras=1"
        );
    }

    #[test]
    fn test_extra_serializes_tagged() {
        let json = serde_json::to_string(&Extra::Int(5)).unwrap();
        assert_eq!(json, r#"{"type":"int","value":5}"#);
    }
}
