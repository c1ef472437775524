//! mdscribe - Render JSON document descriptions to Markdown

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdscribe::{ConfigOverrides, Error, Renderer, import};

#[derive(Parser)]
#[command(name = "mdscribe")]
#[command(version, about = "Render JSON document descriptions to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdscribe doc.json                 Print Markdown to stdout
    mdscribe doc.json -o doc.md       Write Markdown to a file
    mdscribe doc.json --preview 200   Print the first 200 characters")]
struct Cli {
    /// Input document (JSON)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// JSON file with configuration overrides, applied after the document's own
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<String>,

    /// Only render the first N characters of the document
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Write the output and exit successfully even if references are broken
    #[arg(long)]
    allow_errors: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let doc = import::open(&cli.input)?;
    let mut renderer = Renderer::new().with_overrides(&doc.overrides);
    if let Some(path) = &cli.config {
        renderer = renderer.with_overrides(&read_overrides(path)?);
    }

    if let Some(max_chars) = cli.preview {
        let text = renderer.preview(&doc.root, max_chars)?;
        write_output(cli, &text)?;
        return Ok(ExitCode::SUCCESS);
    }

    match renderer.render(&doc.root) {
        Ok(text) => {
            write_output(cli, &text)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::References { output, errors }) => {
            if !cli.quiet {
                for error in &errors {
                    eprintln!("{}: {error}", error.kind);
                }
            }
            write_output(cli, &output)?;
            if cli.allow_errors {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("error: {} reference problem(s)", errors.len());
                Ok(ExitCode::FAILURE)
            }
        }
        Err(e) => Err(e),
    }
}

fn read_overrides(path: &str) -> Result<ConfigOverrides, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_output(cli: &Cli, text: &str) -> Result<(), Error> {
    match &cli.output {
        Some(path) => {
            std::fs::write(Path::new(path), text)?;
            if !cli.quiet {
                eprintln!("Wrote {} characters to {path}", text.chars().count());
            }
        }
        None => print!("{text}"),
    }
    Ok(())
}
