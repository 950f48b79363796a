//! Intent-scheme URI decoding
//!
//! Decodes `intent:` URIs of the form
//!
//! ```text
//! intent://example/#Intent;scheme=kakaolink;package=com.kakao.talk;S.browser_fallback_url=https%3A%2F%2Fexample.com;end
//! ```
//!
//! into an [`Intent`]. Anything not starting with `intent:` must be an
//! absolute URL and decodes to a plain view intent.

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::intent::{ComponentName, Extra, Intent};

const INTENT_SCHEME: &str = "intent:";
const INTENT_FRAGMENT: &str = "#Intent;";
const END_MARKER: &str = "end";

/// Errors produced while decoding a URI into an intent.
///
/// `position` is the byte offset of the offending entry within the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("not a valid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("illegal Intent URI format at {position}: entry is not terminated")]
    MissingTerminator { position: usize },

    #[error("illegal Intent URI format at {position}: entry has no '='")]
    MalformedEntry { position: usize },

    #[error("unknown EXTRA type at {position}")]
    UnknownExtraType { position: usize },

    #[error("invalid value for '{key}': {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("invalid component name: {0:?}")]
    InvalidComponent(String),
}

/// Decode a URI string into an [`Intent`] using intent-scheme rules.
///
/// Surrounding whitespace is ignored for both plain and `intent:` input.
pub fn parse_uri(uri: &str) -> Result<Intent, ParseError> {
    let uri = uri.trim();
    if !uri.starts_with(INTENT_SCHEME) {
        return parse_plain_url(uri);
    }

    // Only a trailing `#Intent;` fragment carries entries; any other fragment
    // belongs to the data part.
    let fragment_start = uri
        .rfind('#')
        .filter(|&i| uri[i..].starts_with(INTENT_FRAGMENT));

    let Some(start) = fragment_start else {
        // Without entries the whole URI, scheme included, is the data
        return Ok(Intent::view(uri));
    };

    let data = &uri[..start];
    let entries_at = start + INTENT_FRAGMENT.len();

    let mut base = Intent::default();
    let mut selector: Option<Intent> = None;
    let mut scheme: Option<String> = None;

    let mut i = entries_at;
    loop {
        if uri[i..].starts_with(END_MARKER) {
            break;
        }
        let semi = uri[i..]
            .find(';')
            .map(|off| i + off)
            .ok_or(ParseError::MissingTerminator { position: i })?;
        let entry = &uri[i..semi];

        if entry == "SEL" {
            selector = Some(Intent::new(String::new()));
            i = semi + 1;
            continue;
        }

        let (name, raw_value) = entry
            .split_once('=')
            .ok_or(ParseError::MalformedEntry { position: i })?;
        let value = decode(raw_value);
        let in_selector = selector.is_some();
        let target = selector.as_mut().unwrap_or(&mut base);

        match name {
            "action" => target.action = value,
            "category" => target.add_category(value),
            "type" => target.mime_type = Some(value),
            "identifier" => target.identifier = Some(value),
            "launchFlags" => target.launch_flags = decode_flags(&value)?,
            "package" => target.package = Some(value),
            "component" => {
                target.component = Some(
                    ComponentName::unflatten(&value)
                        .ok_or_else(|| ParseError::InvalidComponent(value.clone()))?,
                )
            }
            "scheme" if in_selector => target.data = Some(format!("{}:", value)),
            "scheme" => scheme = Some(value),
            "sourceBounds" => target.source_bounds = Some(value),
            _ => {
                let (prefix, key) = split_extra_name(name, i)?;
                let extra = decode_extra(prefix, &key, value, i)?;
                target.put_extra(key, extra);
            }
        }

        i = semi + 1;
        if i >= uri.len() {
            return Err(ParseError::MissingTerminator { position: i });
        }
    }

    // A selector without `action=` keeps an empty action
    if let Some(sel) = selector {
        if base.package.is_none() {
            base.selector = Some(Box::new(sel));
        }
    }

    base.data = data_from_intent_uri(data, scheme.as_deref());
    Ok(base)
}

/// Non-intent input: must be an absolute URL
fn parse_plain_url(uri: &str) -> Result<Intent, ParseError> {
    url::Url::parse(uri).map_err(|e| ParseError::InvalidUrl {
        reason: e.to_string(),
    })?;
    Ok(Intent::view(uri))
}

/// Strip `intent:` from the data part and re-attach the declared scheme
fn data_from_intent_uri(data: &str, scheme: Option<&str>) -> Option<String> {
    let rest = data.strip_prefix(INTENT_SCHEME).unwrap_or(data);
    let data = match scheme {
        Some(scheme) => format!("{}:{}", scheme, rest),
        None => rest.to_string(),
    };
    (!data.is_empty()).then_some(data)
}

/// Percent-decode an entry value. `+` is kept literally.
fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

const EXTRA_PREFIXES: &str = "SBbcdfils";

/// Split `S.key` into (`S`, decoded key)
fn split_extra_name(name: &str, position: usize) -> Result<(char, String), ParseError> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(prefix), Some('.')) if EXTRA_PREFIXES.contains(prefix) => {
            Ok((prefix, decode(&name[2..])))
        }
        _ => Err(ParseError::UnknownExtraType { position }),
    }
}

fn decode_extra(
    prefix: char,
    key: &str,
    value: String,
    position: usize,
) -> Result<Extra, ParseError> {
    let invalid = |value: &str| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };

    let extra = match prefix {
        'S' => Extra::String(value),
        // Anything other than a case-insensitive "true" is false
        'B' => Extra::Bool(value.eq_ignore_ascii_case("true")),
        'b' => Extra::Byte(value.parse().map_err(|_| invalid(&value))?),
        'c' => Extra::Char(value.chars().next().ok_or_else(|| invalid(&value))?),
        'd' => Extra::Double(value.parse().map_err(|_| invalid(&value))?),
        'f' => Extra::Float(value.parse().map_err(|_| invalid(&value))?),
        'i' => Extra::Int(value.parse().map_err(|_| invalid(&value))?),
        'l' => Extra::Long(value.parse().map_err(|_| invalid(&value))?),
        's' => Extra::Short(value.parse().map_err(|_| invalid(&value))?),
        _ => return Err(ParseError::UnknownExtraType { position }),
    };
    Ok(extra)
}

/// Decode launch flags: decimal, `0x` hex, or leading-zero octal
fn decode_flags(value: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::InvalidValue {
        key: "launchFlags".to_string(),
        value: value.to_string(),
    };

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8)
    } else {
        digits.parse::<i64>()
    }
    .map_err(|_| invalid())?;

    let signed = if negative { -magnitude } else { magnitude };
    i32::try_from(signed)
        .map(|v| v as u32)
        .or_else(|_| u32::try_from(signed))
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{ACTION_VIEW, EXTRA_BROWSER_FALLBACK_URL};

    const KAKAO: &str = "intent://example/#Intent;package=com.kakao.talk;S.browser_fallback_url=https://fallback.example.com;end";

    #[test]
    fn test_parse_kakao_intent() {
        let intent = parse_uri(KAKAO).unwrap();
        assert_eq!(intent.action, ACTION_VIEW);
        assert_eq!(intent.package.as_deref(), Some("com.kakao.talk"));
        assert_eq!(intent.data.as_deref(), Some("//example/"));
        assert_eq!(
            intent.browser_fallback_url(),
            Some("https://fallback.example.com")
        );
    }

    #[test]
    fn test_parse_scheme_rebuilds_data() {
        let intent =
            parse_uri("intent://send?appkey=abc#Intent;scheme=kakaolink;package=com.kakao.talk;end")
                .unwrap();
        assert_eq!(intent.data.as_deref(), Some("kakaolink://send?appkey=abc"));
        assert_eq!(intent.data_scheme().as_deref(), Some("kakaolink"));
    }

    #[test]
    fn test_parse_plain_https_url() {
        let intent = parse_uri("https://example.com/path?q=1").unwrap();
        assert_eq!(intent.action, ACTION_VIEW);
        assert_eq!(intent.data.as_deref(), Some("https://example.com/path?q=1"));
        assert!(intent.package.is_none());
    }

    #[test]
    fn test_parse_plain_custom_scheme_url() {
        let intent = parse_uri("kakaotalk://inappbrowser?url=x").unwrap();
        assert_eq!(intent.data_scheme().as_deref(), Some("kakaotalk"));
    }

    #[test]
    fn test_parse_rejects_relative_plain_url() {
        let err = parse_uri("not a url").unwrap_err();
        assert!(matches!(err, ParseError::InvalidUrl { .. }));
    }

    #[test]
    fn test_parse_percent_decodes_values_and_keeps_plus() {
        let intent = parse_uri(
            "intent:#Intent;S.browser_fallback_url=https%3A%2F%2Fexample.com%2F%3Fa%3D1+2;S.my%20key=v;end",
        )
        .unwrap();
        assert_eq!(
            intent.string_extra(EXTRA_BROWSER_FALLBACK_URL),
            Some("https://example.com/?a=1+2")
        );
        assert_eq!(intent.string_extra("my key"), Some("v"));
        assert!(intent.data.is_none());
    }

    #[test]
    fn test_parse_all_extra_types() {
        let intent = parse_uri(
            "intent:#Intent;S.s=x;B.b=TRUE;b.y=-5;c.c=zed;d.d=1.5;f.f=2.5;i.i=42;l.l=9000000000;s.h=7;end",
        )
        .unwrap();
        assert_eq!(intent.extra("s"), Some(&Extra::String("x".into())));
        assert_eq!(intent.extra("b"), Some(&Extra::Bool(true)));
        assert_eq!(intent.extra("y"), Some(&Extra::Byte(-5)));
        assert_eq!(intent.extra("c"), Some(&Extra::Char('z')));
        assert_eq!(intent.extra("d"), Some(&Extra::Double(1.5)));
        assert_eq!(intent.extra("f"), Some(&Extra::Float(2.5)));
        assert_eq!(intent.extra("i"), Some(&Extra::Int(42)));
        assert_eq!(intent.extra("l"), Some(&Extra::Long(9_000_000_000)));
        assert_eq!(intent.extra("h"), Some(&Extra::Short(7)));
    }

    #[test]
    fn test_parse_bool_extra_non_true_is_false() {
        let intent = parse_uri("intent:#Intent;B.flag=yes;end").unwrap();
        assert_eq!(intent.extra("flag"), Some(&Extra::Bool(false)));
    }

    #[test]
    fn test_parse_action_category_type_component() {
        let intent = parse_uri(
            "intent:#Intent;action=android.intent.action.SEND;category=android.intent.category.BROWSABLE;category=android.intent.category.DEFAULT;type=text/plain;component=com.a/.Main;sourceBounds=0 0 10 10;identifier=id1;end",
        )
        .unwrap();
        assert_eq!(intent.action, "android.intent.action.SEND");
        assert_eq!(intent.categories.len(), 2);
        assert_eq!(intent.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(intent.component, Some(ComponentName::new("com.a", "com.a.Main")));
        assert_eq!(intent.target_package(), Some("com.a"));
        assert_eq!(intent.source_bounds.as_deref(), Some("0 0 10 10"));
        assert_eq!(intent.identifier.as_deref(), Some("id1"));
    }

    #[test]
    fn test_parse_launch_flags() {
        assert_eq!(
            parse_uri("intent:#Intent;launchFlags=0x10000000;end")
                .unwrap()
                .launch_flags,
            0x1000_0000
        );
        assert_eq!(
            parse_uri("intent:#Intent;launchFlags=010;end")
                .unwrap()
                .launch_flags,
            8
        );
        assert_eq!(
            parse_uri("intent:#Intent;launchFlags=268435456;end")
                .unwrap()
                .launch_flags,
            268_435_456
        );
    }

    #[test]
    fn test_parse_invalid_launch_flags() {
        let err = parse_uri("intent:#Intent;launchFlags=abc;end").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { ref key, .. } if key == "launchFlags"));
    }

    #[test]
    fn test_parse_selector_attached_without_package() {
        let intent =
            parse_uri("intent://x#Intent;SEL;scheme=market;action=android.intent.action.MAIN;end")
                .unwrap();
        let sel = intent.selector.expect("selector");
        assert_eq!(sel.data.as_deref(), Some("market:"));
        assert_eq!(sel.action, "android.intent.action.MAIN");
        assert_eq!(intent.data.as_deref(), Some("//x"));
    }

    #[test]
    fn test_parse_selector_dropped_with_package() {
        let intent =
            parse_uri("intent:#Intent;package=com.a;SEL;package=com.b;end").unwrap();
        assert_eq!(intent.package.as_deref(), Some("com.a"));
        assert!(intent.selector.is_none());
    }

    #[test]
    fn test_parse_without_fragment_is_data_only() {
        let intent = parse_uri("intent://example/path").unwrap();
        assert_eq!(intent.data.as_deref(), Some("intent://example/path"));
        assert!(intent.extras.is_empty());
    }

    #[test]
    fn test_parse_foreign_fragment_is_data() {
        let intent = parse_uri("intent://example/#section").unwrap();
        assert_eq!(intent.data.as_deref(), Some("intent://example/#section"));
    }

    #[test]
    fn test_parse_hash_in_flags_ends_entries() {
        // The last '#' starts the fragment, so entries are never read
        let uri = "intent:#Intent;launchFlags=#20;end";
        let intent = parse_uri(uri).unwrap();
        assert_eq!(intent.launch_flags, 0);
        assert_eq!(intent.data.as_deref(), Some(uri));
    }

    #[test]
    fn test_decode_flags_forms() {
        assert_eq!(decode_flags("16"), Ok(16));
        assert_eq!(decode_flags("0X1f"), Ok(0x1f));
        assert_eq!(decode_flags("0"), Ok(0));
        assert_eq!(decode_flags("-1"), Ok(u32::MAX));
        assert!(decode_flags("#20").is_err());
    }

    #[test]
    fn test_parse_selector_without_action_stays_empty() {
        let intent = parse_uri("intent://x#Intent;SEL;scheme=market;end").unwrap();
        let sel = intent.selector.expect("selector");
        assert!(sel.action.is_empty());
        assert_eq!(sel.data.as_deref(), Some("market:"));
    }

    #[test]
    fn test_parse_trims_intent_uri() {
        let intent = parse_uri(&format!("  {}\n", KAKAO)).unwrap();
        assert_eq!(intent.package.as_deref(), Some("com.kakao.talk"));
        assert_eq!(
            intent.browser_fallback_url(),
            Some("https://fallback.example.com")
        );
    }

    #[test]
    fn test_parse_missing_end() {
        let err = parse_uri("intent://x#Intent;package=com.a;").unwrap_err();
        assert!(matches!(err, ParseError::MissingTerminator { .. }));

        let err = parse_uri("intent://x#Intent;package=com.a").unwrap_err();
        assert!(matches!(err, ParseError::MissingTerminator { .. }));
    }

    #[test]
    fn test_parse_unknown_extra_type() {
        let err = parse_uri("intent:#Intent;X.key=v;end").unwrap_err();
        assert_eq!(err, ParseError::UnknownExtraType { position: 15 });

        let err = parse_uri("intent:#Intent;bogus=v;end").unwrap_err();
        assert!(matches!(err, ParseError::UnknownExtraType { .. }));
    }

    #[test]
    fn test_parse_entry_without_equals() {
        let err = parse_uri("intent:#Intent;package;end").unwrap_err();
        assert!(matches!(err, ParseError::MalformedEntry { .. }));
    }

    #[test]
    fn test_parse_invalid_numeric_extra() {
        let err = parse_uri("intent:#Intent;i.count=many;end").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidValue {
                key: "count".into(),
                value: "many".into()
            }
        );
    }

    #[test]
    fn test_parse_invalid_component() {
        let err = parse_uri("intent:#Intent;component=nocls;end").unwrap_err();
        assert!(matches!(err, ParseError::InvalidComponent(_)));
    }
}
