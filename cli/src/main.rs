//! docxtext CLI - plain-text extraction from Word documents
//!
//! Prints the paragraph text of a `.docx` file. Extraction failures are
//! reported in the output itself as `Error reading .docx file: ...`.

use clap::{CommandFactory, Parser};
use colored::*;
use docxtext::render::{self, JsonFormat};
use docxtext::{ExtractOptions, ExtractedText};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Plain-text extraction from .docx files
#[derive(Parser)]
#[command(
    name = "docxtext",
    version,
    about = "Extract plain text from Word documents",
    long_about = "docxtext - plain-text extraction from .docx files.\n\n\
                  Prints the text of every paragraph in word/document.xml, one per line."
)]
struct Cli {
    /// Input .docx file
    input: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print paragraphs as JSON
    #[arg(long)]
    json: bool,

    /// Output compact JSON (no indentation)
    #[arg(long, requires = "json")]
    compact: bool,

    /// Paragraph separator; `\n` and `\t` escapes are understood
    #[arg(long)]
    separator: Option<String>,

    /// Normalize text to Unicode NFC
    #[arg(long)]
    normalize: bool,

    /// Drop paragraphs that contain only whitespace
    #[arg(long)]
    skip_blank: bool,

    /// Print paragraph, word and character counts to stderr
    #[arg(long)]
    stats: bool,
}

impl Cli {
    fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new()
            .with_normalize(self.normalize)
            .with_skip_whitespace_only(self.skip_blank);
        if let Some(ref separator) = self.separator {
            options = options.with_separator(unescape_separator(separator));
        }
        options
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let Some(input) = cli.input.as_deref() else {
        println!("{}", Cli::command().render_usage());
        process::exit(1);
    };

    if !input.exists() {
        println!("File not found: {}", input.display());
        process::exit(1);
    }

    if let Err(e) = run(&cli, input) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.extract_options();

    let content = match docxtext::extract(input, &options) {
        Ok(extracted) => {
            if cli.stats {
                print_stats(input, &extracted);
            }
            render_output(cli, &extracted, &options)?
        }
        Err(e) => {
            log::debug!("extraction of {} failed: {:?}", input.display(), e);
            docxtext::error_message(&e)
        }
    };

    write_output(cli.output.as_deref(), &content)?;

    if let Some(ref path) = cli.output {
        eprintln!("{} Extracted text: {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

fn render_output(
    cli: &Cli,
    extracted: &ExtractedText,
    options: &ExtractOptions,
) -> docxtext::Result<String> {
    if cli.json {
        let format = if cli.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        render::to_json(extracted, format)
    } else {
        Ok(render::to_text(extracted, options))
    }
}

fn print_stats(input: &Path, extracted: &ExtractedText) {
    eprintln!("{}", "Document Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40));
    eprintln!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    eprintln!("{}: {}", "Paragraphs".bold(), extracted.len());
    eprintln!("{}: {}", "Words".bold(), extracted.word_count());
    eprintln!("{}: {}", "Characters".bold(), extracted.char_count());
}

fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn write_output(path: Option<&Path>, content: &str) -> io::Result<()> {
    match path {
        Some(p) => fs::write(p, content),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)
        }
    }
}
