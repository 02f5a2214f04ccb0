//! `utf8config` CLI: check, format, query and export utf8config files.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a file and print a summary of its sections
//! utf8config check -i app.conf
//!
//! # Re-format in canonical layout (stdin → stdout)
//! cat app.conf | utf8config fmt
//!
//! # Re-format in place, dropping every comment
//! utf8config fmt -i app.conf -o app.conf --strip-comments
//!
//! # Print one value in its written form
//! utf8config get DEFAULT port -i app.conf
//!
//! # Export values (no comments) as pretty-printed JSON
//! utf8config json -i app.conf -o app.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use utf8config::Config;

#[derive(Parser)]
#[command(
    name = "utf8config",
    version,
    about = "Comment-preserving typed INI configuration tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report its sections and fields
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Rewrite a file in canonical layout
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Drop upper and side comments
        #[arg(long)]
        strip_comments: bool,
    },
    /// Print the value of one field
    Get {
        /// Section name
        section: String,
        /// Field key
        key: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Export values as JSON: `{ section: { key: value } }`
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input } => {
            let config = load(input.as_deref())?;
            let fields: usize = config.values().map(|s| s.len()).sum();
            println!("OK: {} sections, {} fields", config.len(), fields);
            for section in config.values() {
                println!("  [{}] {} fields", section.name(), section.len());
            }
        }
        Commands::Fmt {
            input,
            output,
            strip_comments,
        } => {
            let config = load(input.as_deref())?;
            let text = config
                .dump(strip_comments)
                .context("Failed to format config")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get {
            section,
            key,
            input,
        } => {
            let config = load(input.as_deref())?;
            let value = config
                .value(&section, &key)
                .with_context(|| format!("No value at [{}] {}", section, key))?;
            let text = utf8config::encode(value, false)
                .with_context(|| format!("Failed to encode [{}] {}", section, key))?;
            println!("{}", text);
        }
        Commands::Json { input, output } => {
            let config = load(input.as_deref())?;
            let mut json = config.to_json().context("Failed to export JSON")?;
            json.push('\n');
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn load(path: Option<&str>) -> Result<Config> {
    let text = read_input(path)?;
    Config::load(&text).with_context(|| format!("Failed to parse {}", path.unwrap_or("<stdin>")))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            utf8config::read_text(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            utf8config::write_text(content, path)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
