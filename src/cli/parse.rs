use super::format_timestamp;
use owo_colors::OwoColorize;
use prajna_subs::subtitle::parser::{self, Dialect};
use prajna_subs::utils::validation::validate_caption_file;
use std::error::Error;
use std::fs;
use std::path::Path;

pub fn handle_parse(file: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    validate_caption_file(file)?;

    let text = parser::decode(&fs::read(file)?);
    let dialect = parser::detect_dialect(&text);
    let cues = parser::parse(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&cues)?);
        return Ok(());
    }

    let dialect = match dialect {
        Dialect::SubRip => "SubRip",
        Dialect::WebVtt => "WebVTT",
    };
    println!(
        "{} {} ({dialect}, {} cues)",
        "Parsed".bright_black(),
        file.display().to_string().cyan(),
        cues.len()
    );
    println!();

    if cues.is_empty() {
        println!("{} No cues found", "⚠".yellow());
        return Ok(());
    }

    for (i, cue) in cues.iter().enumerate() {
        println!(
            "{:>5}  {} --> {}",
            (i + 1).to_string().bright_black(),
            format_timestamp(cue.start_ms).green(),
            format_timestamp(cue.end_ms).green()
        );
        for line in cue.text.lines() {
            println!("       {line}");
        }
    }

    Ok(())
}
