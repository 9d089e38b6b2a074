//! Loading scanner configuration from JSON.

use std::fs;

use happy_ui::{
    Error,
    config::ScannerConfig,
    layout::{DeviceClass, HostEnvironment, Platform},
    scanner::ACCOUNT_PREFIX,
    theme::ThemeTokens,
};

fn detected() -> HostEnvironment {
    HostEnvironment {
        device_class: Some(DeviceClass::Other),
        platform: Platform::Linux,
        desktop_host: false,
    }
}

#[test]
fn full_config_from_file() {
    let path = std::env::temp_dir().join(format!("happy-ui-config-{}.json", std::process::id()));
    fs::write(
        &path,
        r##"{
            "url_prefix": "happy:///account?",
            "locale": "es",
            "theme": { "preset": "dark", "overrides": { "text_link": "#ff0000" } },
            "host": { "device_class": "tablet", "platform": "web", "desktop_host": false }
        }"##,
    )
    .unwrap();

    let config = ScannerConfig::from_path(&path).unwrap();
    fs::remove_file(&path).unwrap();
    let resolved = config.resolve(detected()).unwrap();

    assert_eq!(resolved.url_prefix, ACCOUNT_PREFIX);
    assert_eq!(resolved.locale.to_string(), "es");
    assert_eq!(resolved.theme.surface, ThemeTokens::dark().surface);
    assert_eq!(resolved.theme.text_link.to_rgba8().r, 255);
    assert_eq!(resolved.host.device_class, Some(DeviceClass::Tablet));
    assert_eq!(resolved.host.platform, Platform::Web);
}

#[test]
fn bad_override_color() {
    let json = r#"{ "theme": { "overrides": { "surface": "bluish" } } }"#;
    let err = ScannerConfig::from_json_str(json)
        .unwrap()
        .resolve(detected())
        .unwrap_err();
    match err {
        Error::InvalidColor { value, .. } => assert_eq!(value, "bluish"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_json() {
    assert!(matches!(
        ScannerConfig::from_json_str("{ url_prefix: "),
        Err(Error::Json(_))
    ));
}

#[test]
fn unknown_preset() {
    assert!(matches!(
        ScannerConfig::from_json_str(r#"{ "theme": { "preset": "sepia" } }"#),
        Err(Error::Json(_))
    ));
}
