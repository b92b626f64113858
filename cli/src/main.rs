//! ocrtab CLI - turn OCR JSON records into tables

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use ocrtab::export::{ExportOptions, JsonFormat};
use ocrtab::input::read_record;
use ocrtab::{
    ExportFormat, InstructionLibrary, InstructionSource, Ocrtab, PageRecord, Projection,
    StructuredRecord,
};

#[derive(Parser)]
#[command(name = "ocrtab")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Merge OCR JSON records and export them as CSV, XLSX, and JSON tables", long_about = None)]
struct Cli {
    /// Input JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tables projected from a JSON file
    Tables {
        /// Input JSON file (record, extraction result, or bare data)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Name of the table collecting scalar fields
        #[arg(long)]
        general_name: Option<String>,
    },

    /// Merge per-page JSON records into one extraction result
    Merge {
        /// Page JSON files, in page order
        #[arg(value_name = "PAGES", required = true)]
        pages: Vec<PathBuf>,

        /// Combined document record; when given, page merging is skipped
        #[arg(long, value_name = "FILE")]
        combined: Option<PathBuf>,

        /// Merge pages whose record carries an error marker
        #[arg(long)]
        keep_errors: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print the projected tables instead of the merged JSON
        #[arg(long)]
        tables: bool,
    },

    /// Export every projected table to files
    Export {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: FormatArg,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "exports")]
        output: PathBuf,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List extraction instruction sets, or print one
    Prompts {
        /// Instruction set to print
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Directory of instruction files (*.md)
        #[arg(long, env = "OCRTAB_PROMPT_DIR", default_value = "./prompt_extraction")]
        dir: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Comma-separated values
    Csv,
    /// Excel spreadsheet
    #[value(alias = "excel")]
    Xlsx,
    /// JSON records
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Tables {
            input,
            general_name,
        }) => cmd_tables(&input, general_name),
        Some(Commands::Merge {
            pages,
            combined,
            keep_errors,
            output,
            compact,
            tables,
        }) => cmd_merge(
            &pages,
            combined.as_deref(),
            keep_errors,
            output.as_deref(),
            compact,
            tables,
        ),
        Some(Commands::Export {
            input,
            format,
            output,
            compact,
        }) => cmd_export(&input, &[format.into()], &output, compact),
        Some(Commands::Prompts { name, dir }) => cmd_prompts(&dir, name.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: export all formats if input is provided
            if let Some(input) = cli.input {
                let output = cli.output.unwrap_or_else(|| default_output_dir(&input));
                cmd_export(&input, &ExportFormat::ALL, &output, false)
            } else {
                println!("{}", "Usage: ocrtab <FILE> [OUTPUT]".yellow());
                println!("       ocrtab --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_tables", stem))
}

fn print_tables(projection: &Projection) {
    println!(
        "{} {} ({})",
        "Document:".cyan().bold(),
        projection.result.document_name,
        projection.result.instruction_set_name.dimmed()
    );
    println!();
    print!("{}", projection.to_markdown());
}

fn cmd_tables(input: &Path, general_name: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Ocrtab::new();
    if let Some(name) = general_name {
        builder = builder.with_general_table_name(name);
    }
    let projection = builder.project_file(input)?;
    print_tables(&projection);
    Ok(())
}

fn cmd_merge(
    page_files: &[PathBuf],
    combined: Option<&Path>,
    keep_errors: bool,
    output: Option<&Path>,
    compact: bool,
    tables: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pages = Vec::with_capacity(page_files.len());
    for (i, path) in page_files.iter().enumerate() {
        let mut page = PageRecord::new(i as u32 + 1, path)?;
        // Unreadable pages are skipped by the merge, like failed recognition.
        match read_record(path) {
            Ok(record) => page = page.with_data(record),
            Err(e) => log::warn!("Skipping page {}: {}", path.display(), e),
        }
        pages.push(page);
    }

    let combined: Option<StructuredRecord> = combined.map(read_record).transpose()?;

    let mut builder = Ocrtab::new();
    if keep_errors {
        builder = builder.keep_error_records();
    }
    let projection = builder.merge_and_project(&pages, combined);

    if tables {
        print_tables(&projection);
        return Ok(());
    }

    let json = if compact {
        serde_json::to_string(&projection.result)?
    } else {
        serde_json::to_string_pretty(&projection.result)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_export(
    input: &Path,
    formats: &[ExportFormat],
    output_dir: &Path,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let projection = Ocrtab::new().project_file(input)?;

    let options = ExportOptions::new()
        .with_output_dir(output_dir)
        .with_json_format(if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        });

    let pb = ProgressBar::new(formats.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    let mut failures = 0;
    for format in formats {
        pb.set_message(format!("Exporting {}...", format));
        for outcome in projection.export_all(*format, &options) {
            match outcome.result {
                Ok(path) => written.push(path),
                Err(e) => {
                    failures += 1;
                    pb.println(format!("{}: {}", "Failed".red(), e));
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    if failures > 0 {
        return Err(format!("{} table export(s) failed", failures).into());
    }
    Ok(())
}

fn cmd_prompts(dir: &Path, name: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let library = InstructionLibrary::load(dir)?;

    if let Some(name) = name {
        println!("{}", library.get(name)?);
        return Ok(());
    }

    if library.is_empty() {
        println!(
            "{} {}",
            "No instruction sets found in".yellow(),
            dir.display()
        );
        return Ok(());
    }

    println!("{}", "Instruction sets".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for name in library.names() {
        println!("  {}", name);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ocrtab".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR record merge and table export tool");
    println!();
    println!("License: MIT");
}
