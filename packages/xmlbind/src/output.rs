//! Rendering of bound objects.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;

/// Output format for rendered objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Render a value in the given format.
///
/// YAML output starts with a document marker and has no trailing
/// whitespace; JSON output is pretty-printed. Both end with a newline.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(value)?;
            let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
            Ok(format!("---\n{}\n", lines.join("\n")))
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            Ok(format!("{json}\n"))
        }
    }
}

/// Write rendered content to a file.
///
/// Writes to a temporary sibling file, syncs it, then renames it into place
/// so a crash never leaves a half-written file behind.
pub fn save_output(content: &str, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}
