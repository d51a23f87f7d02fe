//! Argument checks shared by the CLI commands.

use crate::constants::MEDIA_EXTENSIONS;
use crate::subtitle::language::is_caption_file;
use owo_colors::OwoColorize;
use std::error::Error;
use std::path::Path;

pub fn validate_path_exists(path: &Path) -> Result<(), Box<dyn Error>> {
    if !path.exists() {
        return Err(format!(
            "{} Path does not exist: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    Ok(())
}

/// Library roots and scan targets must be directories.
pub fn validate_is_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    validate_path_exists(path)?;
    if !path.is_dir() {
        return Err(format!(
            "{} Not a directory: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    Ok(())
}

/// An existing `.srt` or `.vtt` file.
pub fn validate_caption_file(path: &Path) -> Result<(), Box<dyn Error>> {
    validate_path_exists(path)?;
    if !path.is_file() || !is_caption_file(path) {
        return Err(format!(
            "{} Not a caption file (.srt or .vtt): {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    Ok(())
}

/// An existing file with one of the player's media extensions.
pub fn validate_media_file(path: &Path) -> Result<(), Box<dyn Error>> {
    validate_path_exists(path)?;
    let is_media = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MEDIA_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
    if !path.is_file() || !is_media {
        return Err(format!(
            "{} Not a media file: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path() {
        let path = Path::new("/this/path/does/not/exist/hopefully/12345");
        let result = validate_path_exists(path);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_is_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_is_dir(temp_dir.path()).is_ok());

        let file_path = temp_dir.path().join("talk.mp3");
        fs::write(&file_path, "fake").unwrap();
        let err = validate_is_dir(&file_path).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[test]
    fn test_validate_caption_file() {
        let temp_dir = TempDir::new().unwrap();
        let srt = temp_dir.path().join("talk.en.srt");
        let mp3 = temp_dir.path().join("talk.mp3");
        fs::write(&srt, "").unwrap();
        fs::write(&mp3, "").unwrap();

        assert!(validate_caption_file(&srt).is_ok());
        assert!(validate_caption_file(&mp3).is_err());
        assert!(validate_caption_file(temp_dir.path()).is_err());

        assert!(validate_media_file(&mp3).is_ok());
        assert!(validate_media_file(&srt).is_err());
    }
}
