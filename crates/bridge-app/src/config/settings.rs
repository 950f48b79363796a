//! Settings parser for .intent-bridge/config.toml

use super::types::Settings;
use bridge_core::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = ".intent-bridge";

/// Java-style package name: dot-separated identifiers, at least two segments
static PACKAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$")
        .expect("Invalid package pattern regex")
});

/// URI scheme per RFC 3986
static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("Invalid scheme regex"));

/// Path of the config file for a project directory
pub fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_DIR).join(CONFIG_FILENAME)
}

/// Load settings from .intent-bridge/config.toml
///
/// A missing or unreadable file yields defaults.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = config_path(project_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match load_settings_file(&config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            for problem in validate_settings(&settings) {
                warn!("{:?}: {}", config_path, problem);
            }
            settings
        }
        Err(e) => {
            warn!("Failed to load {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load settings from an explicit file, failing on any problem
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
}

/// Check values serde cannot: package names and schemes
pub fn validate_settings(settings: &Settings) -> Vec<String> {
    let mut problems = Vec::new();

    for package in &settings.dry_run.installed_packages {
        if !PACKAGE_PATTERN.is_match(package) {
            problems.push(format!("dry_run.installed_packages: invalid package name {:?}", package));
        }
    }

    for scheme in &settings.dry_run.handled_schemes {
        if !SCHEME_PATTERN.is_match(scheme) {
            problems.push(format!("dry_run.handled_schemes: invalid scheme {:?}", scheme));
        }
    }

    if settings.channel.name.trim().is_empty() {
        problems.push("channel.name: must not be empty".to_string());
    }

    problems
}

/// Create a default config file in .intent-bridge/
///
/// Returns the config file path. An existing file is left untouched.
pub fn init_config_dir(project_path: &Path) -> Result<PathBuf> {
    let config_dir = project_path.join(CONFIG_DIR);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .map_err(|e| Error::config(format!("Failed to create {} dir: {}", CONFIG_DIR, e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# intent-bridge configuration

[channel]
name = "com.bottlenote.official.app/intents"
# "lenient": failures show a notice and report success
# "strict": failures are returned to the caller as errors
failure_policy = "lenient"

[notices]
locale = "ko"
duration = "long"

# [notices.overrides]
# app_not_installed = "카카오 앱이 설치되어 있지 않습니다."

[adb]
# path = "/opt/android-sdk/platform-tools/adb"
# serial = "emulator-5554"

[dry_run]
installed_packages = []
handled_schemes = []
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::FailurePolicy;
    use crate::messages::Locale;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) {
        let config_dir = dir.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILENAME), content).unwrap();
    }

    #[test]
    fn test_load_settings_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings.channel.failure_policy, FailurePolicy::Lenient);
    }

    #[test]
    fn test_load_settings_reads_file() {
        let dir = TempDir::new().unwrap();
        write_config(
            dir.path(),
            "[channel]\nfailure_policy = \"strict\"\n[notices]\nlocale = \"en\"\n",
        );
        let settings = load_settings(dir.path());
        assert_eq!(settings.channel.failure_policy, FailurePolicy::Strict);
        assert_eq!(settings.notices.locale, Locale::En);
    }

    #[test]
    fn test_load_settings_invalid_toml_gives_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "[channel\nname = ");
        let settings = load_settings(dir.path());
        assert_eq!(settings.notices.locale, Locale::Ko);
    }

    #[test]
    fn test_load_settings_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_settings_file(&missing),
            Err(Error::ConfigNotFound { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "failure_policy = [").unwrap();
        assert!(matches!(load_settings_file(&bad), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_settings_file_unreadable_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        assert!(matches!(load_settings_file(dir.path()), Err(Error::Io(_))));
    }

    #[test]
    fn test_validate_settings() {
        let mut settings = Settings::default();
        assert!(validate_settings(&settings).is_empty());

        settings.dry_run.installed_packages = vec!["com.kakao.talk".into(), "kakao".into()];
        settings.dry_run.handled_schemes = vec!["kakaolink".into(), "1bad".into()];
        settings.channel.name = " ".into();
        let problems = validate_settings(&settings);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("kakao"));
        assert!(problems[1].contains("1bad"));
    }

    #[test]
    fn test_init_config_dir_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = init_config_dir(dir.path()).unwrap();
        assert!(path.exists());

        let settings = load_settings_file(&path).unwrap();
        assert_eq!(settings.channel.name, "com.bottlenote.official.app/intents");
        assert_eq!(settings.notices.locale, Locale::Ko);
    }

    #[test]
    fn test_init_config_dir_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "[notices]\nlocale = \"en\"\n");
        init_config_dir(dir.path()).unwrap();
        assert_eq!(load_settings(dir.path()).notices.locale, Locale::En);
    }
}
