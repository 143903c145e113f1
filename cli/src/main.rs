//! opinionmd CLI - court opinion to Markdown converter

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use opinionmd::batch::{collect_inputs, convert_all_with_progress, BatchReport};
use opinionmd::{sniff_path, ConvertOptions, Converter, InputKind};

/// Characters of first-page text shown by `info`.
const SAMPLE_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "opinionmd")]
#[command(version)]
#[command(about = "Convert Michigan Court of Appeals opinions to Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an opinion (or a directory of opinions) to Markdown and metadata
    Convert {
        /// Input file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Turn word-attached digits into [^n] footnote references
        #[arg(long)]
        inline_footnotes: bool,

        /// NFC-normalize text and expand ligatures before conversion
        #[arg(long)]
        normalize_unicode: bool,

        /// Print metadata and statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert every supported file in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Turn word-attached digits into [^n] footnote references
        #[arg(long)]
        inline_footnotes: bool,
    },

    /// Show page count, metadata and a text sample
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print only the metadata record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            inline_footnotes,
            normalize_unicode,
            verbose,
        } => {
            let options = ConvertOptions::new()
                .with_inline_footnotes(inline_footnotes)
                .with_unicode_normalization(normalize_unicode)
                .with_stats(verbose);
            cmd_convert(&input, &output, options, verbose)
        }
        Commands::Batch {
            input,
            output,
            inline_footnotes,
        } => {
            let options = ConvertOptions::new().with_inline_footnotes(inline_footnotes);
            cmd_batch(&input, &output, options)
        }
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    options: ConvertOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if input.is_dir() {
        return cmd_batch(input, output, options);
    }

    let converter = Converter::new()?.with_options(options);
    log::debug!("converting {} into {}", input.display(), output.display());
    let conversion = converter.convert_path(input)?;
    let written = opinionmd::write_outputs(
        &conversion,
        &opinionmd::persist::output_stem(input),
        output,
    )?;

    println!("{}", "Output files:".green().bold());
    match &written.metadata_path {
        Some(meta) => {
            println!("  {} {}", "├─".dimmed(), written.markdown_path.display());
            println!("  {} {}", "└─".dimmed(), meta.display());
        }
        None => {
            println!("  {} {}", "└─".dimmed(), written.markdown_path.display());
            println!("{}", "Metadata sidecar could not be written".yellow());
        }
    }

    if verbose {
        println!();
        print_metadata(&conversion.metadata);
        let stats = &conversion.stats;
        println!();
        println!("{}", "Statistics".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Pages".bold(), stats.page_count);
        println!("{}: {}", "Boilerplate lines".bold(), stats.boilerplate_lines);
        println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
        println!("{}: {}", "Headings".bold(), stats.heading_count);
        println!(
            "{}: {} ({} duplicates dropped)",
            "Footnotes".bold(),
            stats.footnote_count,
            stats.duplicate_footnotes
        );
        println!("{}: {}", "Inline references".bold(), stats.inline_references);
        println!("{}: {}", "Words".bold(), stats.word_count);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = Converter::new()?.with_options(options);
    let inputs = collect_inputs(input, converter.registry())?;
    if inputs.is_empty() {
        println!("{} {}", "No convertible files in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = convert_all_with_progress(&converter, &inputs, output, |outcome| {
        if let Some(name) = outcome.input.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    print_report(&report);
    if report.failed() > 0 {
        return Err(format!("{} of {} documents failed", report.failed(), report.outcomes.len()).into());
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    println!(
        "\n{} {} converted, {} failed",
        "Batch complete:".green().bold(),
        report.succeeded(),
        report.failed()
    );
    for failure in report.failures() {
        if let Err(e) = &failure.result {
            println!("  {} {}: {}", "✗".red(), failure.input.display(), e);
        }
    }
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let converter = Converter::new()?;
    let kind = sniff_path(input)?;
    let pages = converter.registry().pages(input)?;
    let conversion = converter.convert_pages(&pages);

    if json {
        println!("{}", serde_json::to_string_pretty(&conversion.metadata)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    let format = match &kind {
        InputKind::Pdf { .. } => kind.to_string(),
        InputKind::Text => "Plain text".to_string(),
    };
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Pages".bold(), pages.len());
    let chars: usize = pages.iter().map(|p| p.chars().count()).sum();
    println!("{}: {}", "Characters".bold(), chars);

    println!();
    print_metadata(&conversion.metadata);

    if let Some(first) = pages.first() {
        let sample: String = first.chars().take(SAMPLE_CHARS).collect();
        println!();
        println!("{}", "First page sample".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", sample.trim_end());
    }

    Ok(())
}

fn print_metadata(metadata: &opinionmd::Metadata) {
    println!("{}", "Metadata".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (key, value) in metadata.present_fields() {
        println!("{}: {}", key.bold(), value);
    }
    if let Some(date) = metadata.decided_on() {
        println!("{}: {}", "decided_on".bold(), date.format("%Y-%m-%d"));
    }
}

fn cmd_version() {
    println!("{} {}", "opinionmd".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Court of Appeals opinion to Markdown converter");
    println!();
    println!("License: MIT");
}
