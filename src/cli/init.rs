use owo_colors::OwoColorize;
use prajna_subs::config::Config;
use prajna_subs::utils::validation::validate_is_dir;
use std::error::Error;
use std::path::Path;

pub fn handle_init(library_root: Option<&str>) -> Result<(), Box<dyn Error>> {
    if Config::exists()? {
        return Err(
            "Prajna is already initialized. Use 'prajna config set <key> <value>' to change settings."
                .into(),
        );
    }

    let mut config = Config::new();
    if let Some(root) = library_root {
        let expanded = shellexpand::tilde(root);
        validate_is_dir(Path::new(expanded.as_ref()))?;
        config.set_value("library_root", root)?;
    }
    config.save()?;

    println!("{} Prajna initialized", "✓".green().bold());
    if let Some(root) = config.library_root_path() {
        println!("  {} {}", "Library:".bright_black(), root.display());
    }
    println!(
        "  {} {}",
        "Configuration:".bright_black(),
        Config::config_path()?.display()
    );

    Ok(())
}
