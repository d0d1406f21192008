use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use exif_report::exif::MetadataMap;
use exif_report::geocode::NominatimResolver;
use exif_report::pipeline;

/// Client label sent to the geocoding service, per its usage policy.
const GEOCODER_USER_AGENT: &str = concat!("exif-report/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(
    name = "exif-report",
    version,
    about = "Extract EXIF metadata from a JPEG, reverse-geocode its GPS coordinates, and export everything to CSV"
)]
struct Cli {
    /// Path to the JPEG file (prompted for when omitted)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let path = match cli.path {
        Some(path) => path,
        None => prompt_for_path()?,
    };

    // Validation failures print a message and still exit normally; the exit
    // code never signals partial success.
    if !path.is_file() {
        println!("File not found: {}", path.display());
        return Ok(());
    }
    if !pipeline::is_jpeg(&path) {
        println!("The file must be a JPEG image: {}", path.display());
        return Ok(());
    }

    let resolver = NominatimResolver::new(GEOCODER_USER_AGENT);
    let result = pipeline::process_image(&path, &resolver).await;

    let Some(ref metadata) = result.metadata else {
        println!("No metadata found");
        return Ok(());
    };

    println!("EXIF Metadata:");
    print_metadata(metadata);

    if let Some(ref coordinate) = result.coordinate {
        println!();
        println!(
            "GPS Coordinates: {}, {}",
            coordinate.latitude, coordinate.longitude
        );
    }
    if let Some(ref address) = result.address {
        println!("Address: {}", address.display_text());
    }

    if let Some(ref report) = result.report_path {
        println!("Metadata saved to {}", report.display());
    }

    Ok(())
}

/// Ask the user for the image path on stdin.
fn prompt_for_path() -> Result<PathBuf> {
    print!("Enter the path to the JPEG file: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}

/// Max width for the value column before wrapping.
const VAL_WIDTH: usize = 46;
/// Indent for continuation lines (tag column width + " : " = 25 chars + 2 leading spaces).
const INDENT: &str = "                           ";

/// Print the extracted tag set as an aligned table.
fn print_metadata(metadata: &MetadataMap) {
    for (tag, value) in metadata {
        print_row(tag, &value.to_string());
    }
}

/// Print a single row in the metadata table.
fn print_row(tag: &str, val: &str) {
    let tag_col = format!("{:<22}", tag);
    let lines = wrap_text(val, VAL_WIDTH);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("  {tag_col} : {line}");
        } else {
            println!("  {INDENT}{line}");
        }
    }
}

/// Wrap text at word boundaries to fit within max_width.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(s.to_string());
    }

    lines
}
