//! Test utilities for host platforms
//!
//! Provides canned intent URLs and pre-configured recording platforms.

use crate::recording::RecordingPlatform;

/// Package used by the canned deep links
pub const KAKAO_PACKAGE: &str = "com.kakao.talk";

/// Fallback URL carried by [`kakao_intent_url`]
pub const KAKAO_FALLBACK_URL: &str = "https://fallback.example.com";

/// Deep link into KakaoTalk with a browser fallback
pub fn kakao_intent_url() -> String {
    format!(
        "intent://example/#Intent;package={};S.browser_fallback_url={};end",
        KAKAO_PACKAGE, KAKAO_FALLBACK_URL
    )
}

/// Deep link into KakaoTalk without any fallback
pub fn kakao_intent_url_without_fallback() -> String {
    format!("intent://example/#Intent;package={};end", KAKAO_PACKAGE)
}

/// Recording platform where KakaoTalk is installed
pub fn platform_with_kakao() -> RecordingPlatform {
    RecordingPlatform::with_installed([KAKAO_PACKAGE])
}

/// Recording platform with nothing installed besides a browser
pub fn bare_platform() -> RecordingPlatform {
    RecordingPlatform::new()
}
