use owo_colors::OwoColorize;
use prajna_subs::subtitle::{Language, SubtitleIndex, build_index};
use prajna_subs::utils::{progress::scan_spinner, validation::validate_is_dir};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Root structure of the exported index YAML
#[derive(Debug, Serialize)]
struct IndexExport<'a> {
    root: String,
    generated: String,
    total: usize,
    complete_pairs: usize,
    captions: &'a SubtitleIndex,
}

pub fn handle_index(root: &Path, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    validate_is_dir(root)?;

    println!(
        "{} {}",
        "Indexing captions under:".bright_black(),
        root.display().to_string().cyan()
    );
    println!();

    let spinner = scan_spinner("Scanning for .en/.vi caption files...");
    let index = build_index(root);
    spinner.finish_and_clear();
    let index = index?;

    if index.is_empty() {
        println!(
            "{} No dual-language captions found in {}",
            "⚠".yellow(),
            root.display().to_string().cyan()
        );
        return Ok(());
    }

    for (base, files) in index.iter() {
        let marks: Vec<String> = Language::ALL
            .into_iter()
            .map(|lang| {
                if files.get(lang).is_some() {
                    lang.label().green().to_string()
                } else {
                    lang.label().bright_black().to_string()
                }
            })
            .collect();
        println!("  {} {base}", marks.join(" "));
    }
    println!();
    println!(
        "  {} {} ({} with both languages)",
        "Caption sets:".bright_black(),
        index.len().to_string().cyan(),
        index.complete_pairs().to_string().cyan()
    );

    if let Some(output) = output {
        let export = IndexExport {
            root: root.display().to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            total: index.len(),
            complete_pairs: index.complete_pairs(),
            captions: &index,
        };
        fs::write(output, serde_yaml::to_string(&export)?)?;
        println!(
            "{} {} {}",
            "✓".green().bold(),
            "Index written to".green(),
            output.display().to_string().cyan()
        );
    }

    Ok(())
}
