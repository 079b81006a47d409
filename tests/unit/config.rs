use std::collections::HashMap;

use super::*;

const SAMPLE: &str = r##"
assets_dir: /srv/brand
background_file: bg.png
background_stats_file: bg_stats.png
overlay_file: frame.png
font_file: Inter.ttf
overlay_alpha: 0.5
reporting:
  token: secret
  workspace: 123
stats:
  mappings:
    - display_name: Writing
      color: "#F2C94C"
      toggl_names: [writing, blog]
  other:
    display_name: Other
    color: "#D35400"
"##;

#[test]
fn parses_full_yaml() {
    let cfg = Config::from_yaml_str(SAMPLE).unwrap();
    assert_eq!(cfg.assets_dir, PathBuf::from("/srv/brand"));
    assert_eq!(cfg.overlay_alpha, 0.5);
    assert!(cfg.reporting.is_configured());
    assert_eq!(cfg.reporting.base_url, DEFAULT_REPORTING_URL);
    assert_eq!(cfg.stats.mappings[0].aliases, ["writing", "blog"]);
    assert_eq!(cfg.stats.other.display_name, "Other");
    cfg.validate().unwrap();
}

#[test]
fn missing_fields_take_defaults() {
    let cfg = Config::from_yaml_str("font_file: a.ttf\n").unwrap();
    assert_eq!(cfg.font_file, "a.ttf");
    assert_eq!(cfg.background_file, "background.png");
    assert_eq!(cfg.overlay_alpha, OVERLAY_ALPHA);
    assert_eq!(cfg.stats.other.display_name, "other");
    assert!(!cfg.reporting.is_configured());
    assert!(cfg.reporting.client().is_err());
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let err = Config::from_yaml_str("overlay_alpha: [1, 2").unwrap_err();
    assert!(matches!(err, PhotopostError::Config(_)));
}

#[test]
fn env_overrides_apply_and_bad_numbers_are_ignored() {
    let env: HashMap<&str, &str> = [
        ("PHOTOPOST_ASSETS_DIR", "/tmp/a"),
        ("PHOTOPOST_REPORTING_TOKEN", "tok"),
        ("PHOTOPOST_REPORTING_WORKSPACE", "not-a-number"),
    ]
    .into_iter()
    .collect();

    let mut cfg = Config::default();
    cfg.reporting.workspace = 5;
    cfg.apply_env_with(|k| env.get(k).map(|v| v.to_string()));

    assert_eq!(cfg.assets_dir, PathBuf::from("/tmp/a"));
    assert_eq!(cfg.reporting.token, "tok");
    assert_eq!(cfg.reporting.workspace, 5);
}

#[test]
fn validate_rejects_out_of_range_alpha() {
    let cfg = Config {
        overlay_alpha: 1.5,
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn asset_loader_joins_paths_under_assets_dir() {
    let cfg = Config::from_yaml_str(SAMPLE).unwrap();
    let loader = cfg.asset_loader();
    assert_eq!(loader.background, PathBuf::from("/srv/brand/bg.png"));
    assert_eq!(
        loader.background_stats,
        Some(PathBuf::from("/srv/brand/bg_stats.png"))
    );
    assert_eq!(loader.overlay, Some(PathBuf::from("/srv/brand/frame.png")));
    assert_eq!(loader.font, PathBuf::from("/srv/brand/Inter.ttf"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = Config::load(Path::new("definitely/not/here.yaml")).unwrap();
    assert_eq!(cfg.background_file, "background.png");
}
