pub mod config;
pub mod diagnose;
pub mod index;
pub mod init;
pub mod pair;
pub mod parse;
pub mod preview;

use owo_colors::OwoColorize;
use prajna_subs::config::Config;
use prajna_subs::subtitle::{SubtitleIndex, build_index};
use prajna_subs::utils::{progress::scan_spinner, validation::validate_is_dir};
use std::error::Error;
use std::path::{Path, PathBuf};

/// `HH:MM:SS.mmm`, with a leading `-` for negative times.
pub fn format_timestamp(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let (hours, rest) = (ms / 3_600_000, ms % 3_600_000);
    let (minutes, rest) = (rest / 60_000, rest % 60_000);
    let (seconds, millis) = (rest / 1000, rest % 1000);
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Index the explicit `--root`, else the configured library root, else none.
pub fn library_index(root: Option<&Path>) -> Result<Option<SubtitleIndex>, Box<dyn Error>> {
    let root: Option<PathBuf> = match root {
        Some(root) => Some(root.to_path_buf()),
        None => Config::load()?.library_root_path(),
    };
    let Some(root) = root else {
        return Ok(None);
    };
    validate_is_dir(&root)?;

    let spinner = scan_spinner(format!("Indexing captions under {}...", root.display()));
    let index = build_index(&root);
    spinner.finish_and_clear();
    let index = index?;

    println!(
        "{} {} caption sets under {}",
        "Indexed".bright_black(),
        index.len().to_string().cyan(),
        root.display().to_string().cyan()
    );
    Ok(Some(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00:00.000");
        assert_eq!(format_timestamp(3_723_004), "01:02:03.004");
        assert_eq!(format_timestamp(-1500), "-00:00:01.500");
    }
}
