use prajna_subs::config::{Config, MAX_FONT_SIZE};
use prajna_subs::subtitle::HoldConfig;
use tempfile::TempDir;

#[test]
fn test_config_lifecycle() {
    // Create a temporary directory for test config
    let temp_dir = TempDir::new().unwrap();

    // Override the config path for testing
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    assert!(!Config::exists().unwrap());
    assert_eq!(Config::load().unwrap(), Config::default());

    let config = Config::new();
    config.save().unwrap();
    assert!(Config::exists().unwrap());

    let loaded = Config::load().unwrap();
    assert!(loaded.subtitles.enabled);
    assert_eq!(loaded.subtitles.hold, HoldConfig::default());

    // Mutations persist across save/load
    let mut config = Config::load().unwrap();
    config.set_value("sub_delay_ms", "-1200").unwrap();
    config.set_value("sub_per_char_ms", "40").unwrap();
    config.set_value("library_root", "~/Dharma Talks").unwrap();
    config.bump_font_size(100);
    config.save().unwrap();

    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.subtitles.delay_ms, -1200);
    assert_eq!(reloaded.subtitles.hold.per_char_ms, 40);
    assert_eq!(reloaded.subtitles.font_size, MAX_FONT_SIZE);
    let root = reloaded.library_root_path().unwrap();
    assert!(root.ends_with("Dharma Talks"));

    let mut config = Config::load().unwrap();
    assert!(config.set_value("invalid_key", "value").is_err());
    assert!(config.set_value("sub_min_hold_ms", "-5").is_err());

    // A hand-written partial file fills the rest with defaults
    let path = Config::config_path().unwrap();
    std::fs::write(&path, "[alignment]\nsamples = 96\n").unwrap();
    let partial = Config::load().unwrap();
    assert_eq!(partial.alignment.samples, 96);
    assert_eq!(partial.subtitles, prajna_subs::config::SubtitleSettings::default());
}
