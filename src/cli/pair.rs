use super::library_index;
use owo_colors::OwoColorize;
use prajna_subs::config::Config;
use prajna_subs::subtitle::NowPlayingSubtitleContext;
use prajna_subs::utils::validation::validate_media_file;
use std::error::Error;
use std::path::Path;

pub fn handle_pair(media: &Path, root: Option<&Path>) -> Result<(), Box<dyn Error>> {
    validate_media_file(media)?;

    let config = Config::load()?;
    let index = library_index(root)?;
    let context = NowPlayingSubtitleContext::load(media, index.as_ref(), &config.alignment)?;

    println!(
        "{} {}",
        "Captions for:".bright_black(),
        media.display().to_string().cyan()
    );

    let Some(stage) = context.stage() else {
        println!("{} No captions found", "⚠".yellow());
        return Ok(());
    };
    println!("  {} {stage}", "Matched by:".bright_black());

    for track in context.tracks() {
        let label = track.language.label();
        match &track.file {
            Some(path) => println!(
                "  {} {} ({} cues)",
                format!("{label}:").bright_black(),
                path.display().to_string().cyan(),
                track.cues.len()
            ),
            None => println!("  {} {}", format!("{label}:").bright_black(), "missing".yellow()),
        }
    }

    for error in context.load_errors() {
        println!("  {} {error}", "✗".red().bold());
    }

    if let Some(report) = context.alignment() {
        let line = report.to_string();
        if report.is_aligned() {
            println!("  {}", line.green());
        } else {
            println!("  {}", line.yellow());
        }
    }

    Ok(())
}
