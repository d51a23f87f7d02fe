use super::{format_timestamp, library_index};
use owo_colors::OwoColorize;
use prajna_subs::config::Config;
use prajna_subs::subtitle::{NowPlayingSubtitleContext, effective_end};
use prajna_subs::utils::validation::validate_media_file;
use std::error::Error;
use std::path::Path;

fn seconds_to_ms(seconds: f64) -> Result<i64, Box<dyn Error>> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("Invalid time: {seconds}").into());
    }
    Ok((seconds * 1000.0).round() as i64)
}

/// Walk the player's tick loop over `[from, to]` and print each caption change.
pub fn handle_preview(
    media: &Path,
    root: Option<&Path>,
    from: f64,
    to: Option<f64>,
    step: i64,
) -> Result<(), Box<dyn Error>> {
    validate_media_file(media)?;
    if step <= 0 {
        return Err("Tick interval must be positive".into());
    }

    let config = Config::load()?;
    let settings = &config.subtitles;
    if !settings.enabled {
        println!(
            "{} Subtitles are disabled. Run 'prajna config set sub_enabled true'.",
            "⚠".yellow()
        );
        return Ok(());
    }

    let index = library_index(root)?;
    let mut context = NowPlayingSubtitleContext::load(media, index.as_ref(), &config.alignment)?;
    for error in context.load_errors() {
        println!("{} {error}", "✗".red().bold());
    }
    println!("{}", context.status_line().bright_black());
    if !context.has_cues() {
        return Ok(());
    }

    let from_ms = seconds_to_ms(from)?;
    let to_ms = match to {
        Some(to) => seconds_to_ms(to)?,
        None => context
            .tracks()
            .iter()
            .filter_map(|track| track.cues.last())
            .map(|cue| effective_end(cue, None, &settings.hold))
            .max()
            .unwrap_or(0)
            .saturating_sub(settings.delay_ms),
    };
    if settings.delay_ms != 0 {
        println!("{} {:+}ms", "Delay:".bright_black(), settings.delay_ms);
    }
    println!();

    for t in (from_ms..=to_ms).step_by(usize::try_from(step)?) {
        let frame = context.tick(t, settings);
        for track in frame.tracks.iter().filter(|track| track.changed) {
            let label = format!("{}:", track.language.label());
            match &track.text {
                Some(text) => println!(
                    "{}  {} {}",
                    format_timestamp(t).green(),
                    label.cyan(),
                    text.replace('\n', " / ")
                ),
                None => println!(
                    "{}  {} {}",
                    format_timestamp(t).green(),
                    label.cyan(),
                    "(clear)".bright_black()
                ),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_ms() {
        assert_eq!(seconds_to_ms(1.5).unwrap(), 1500);
        assert_eq!(seconds_to_ms(0.0).unwrap(), 0);
        assert!(seconds_to_ms(-1.0).is_err());
        assert!(seconds_to_ms(f64::NAN).is_err());
    }
}
