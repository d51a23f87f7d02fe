use owo_colors::OwoColorize;
use prajna_subs::config::Config;
use prajna_subs::subtitle::{AlignmentReport, Verdict, diagnose_with, parser};
use prajna_subs::utils::validation::validate_caption_file;
use serde::Serialize;
use std::error::Error;
use std::path::Path;

#[derive(Debug, Serialize)]
struct DiagnoseOutput<'a> {
    first: &'a Path,
    second: &'a Path,
    first_cues: usize,
    second_cues: usize,
    #[serde(flatten)]
    report: &'a AlignmentReport,
}

pub fn handle_diagnose(first: &Path, second: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    validate_caption_file(first)?;
    validate_caption_file(second)?;

    let config = Config::load()?;
    let a = parser::load(first)?;
    let b = parser::load(second)?;
    let report = diagnose_with(&a, &b, &config.alignment);

    if json {
        let output = DiagnoseOutput {
            first,
            second,
            first_cues: a.len(),
            second_cues: b.len(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({} cues)",
        "A:".bright_black(),
        first.display().to_string().cyan(),
        a.len()
    );
    println!(
        "{} {} ({} cues)",
        "B:".bright_black(),
        second.display().to_string().cyan(),
        b.len()
    );

    let line = report.to_string();
    match report.verdict {
        Verdict::Aligned => println!("{}", line.green()),
        Verdict::Mismatch => println!("{}", line.yellow()),
        Verdict::InsufficientData => println!("{}", line.bright_black()),
    }

    Ok(())
}
