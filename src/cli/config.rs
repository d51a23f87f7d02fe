use prajna_subs::config::Config;
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let subs = &config.subtitles;

    println!("Current Prajna configuration:");
    println!(
        "  library_root: {}",
        config.library_root.as_deref().unwrap_or("(not set)")
    );
    println!("  sub_enabled: {}", subs.enabled);
    println!("  sub_delay_ms: {}", subs.delay_ms);
    println!("  sub_linger_ms: {}", subs.hold.linger_ms);
    println!("  sub_min_hold_ms: {}", subs.hold.min_hold_ms);
    println!("  sub_per_char_ms: {}", subs.hold.per_char_ms);
    println!("  sub_font_size: {}", subs.font_size);
    println!(
        "  alignment: {} samples, overlap >= {:.0}%, offset <= {:.1}s",
        config.alignment.samples,
        config.alignment.min_overlap * 100.0,
        config.alignment.max_offset_seconds
    );

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("Configuration updated: {key} = {value}");

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    if !Config::exists()? {
        return Err("Prajna not initialized. Run 'prajna init' first.".into());
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
