//! Command-line interface for the binder.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::binder::Binder;
use crate::config::{BinderConfig, DEFAULT_MAX_DEPTH};
use crate::error::{BindError, Result};
use crate::model::{timezone_policy, TimezoneList};
use crate::output::{render, save_output, OutputFormat};
use crate::schema::Bindable;
use crate::xml::{bytes_to_str, parse_document, qualified_name};

/// xmlbind - Bind XML documents onto typed objects.
#[derive(Parser)]
#[command(name = "xmlbind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bind a timezone list document and print it.
    Timezones {
        /// XML file to bind
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Element local name to skip, subtree included (repeatable)
        #[arg(long = "skip", value_name = "NAME")]
        skip: Vec<String>,

        /// Maximum element nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Skip elements without a matching field instead of failing
        #[arg(long)]
        ignore_unknown: bool,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Timezones {
            file,
            format,
            skip,
            max_depth,
            ignore_unknown,
            output,
        } => {
            let config = BinderConfig::new()
                .with_max_depth(max_depth)
                .with_ignore_unknown_fields(ignore_unknown);
            timezones_command(&file, format, &skip, config, output.as_deref())
        }
    }
}

/// Execute the timezones command.
fn timezones_command(
    file: &Path,
    format: OutputFormat,
    skip: &[String],
    config: BinderConfig,
    output: Option<&Path>,
) -> Result<()> {
    config.validate()?;

    let bytes = fs::read(file)?;
    let doc = parse_document(bytes_to_str(&bytes)?)?;

    let mut policy = timezone_policy();
    policy.skip_elements(skip.iter().cloned());

    let list: TimezoneList = Binder::with_config(&mut policy, config)
        .bind_document(&doc)?
        .ok_or_else(|| BindError::Construction {
            element: qualified_name(doc.root_element()),
            type_name: TimezoneList::type_name().to_string(),
        })?;

    eprintln!(
        "{} {} from {}",
        style("Bound").bold(),
        style(format!("{} timezones", list.timezones.len())).cyan(),
        style(file.display()).green()
    );
    let mut skipped: Vec<&str> = policy.skipped_tags().into_iter().collect();
    if !skipped.is_empty() {
        skipped.sort_unstable();
        eprintln!("  Skipped: {}", style(skipped.join(", ")).yellow());
    }
    if let Some(dtstamp) = list.dtstamp {
        eprintln!("  Generated: {}", style(dtstamp.to_rfc3339()).green());
    }

    let rendered = render(&list, format)?;

    match output {
        Some(path) => {
            save_output(&rendered, path)?;
            eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
