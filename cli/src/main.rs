//! sectionrank CLI - persona-driven PDF section ranking tool

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sectionrank::analysis::{complexity, keyword_score, normalize, score_line};
use sectionrank::pipeline::{analyze_paths_with, collect_pdf_paths, document_name};
use sectionrank::{
    outline_file, render, AnalyzeOptions, JsonFormat, PersonaConfig, PERSONA_CONFIG_FILE,
};

const DEFAULT_INPUT_DIR: &str = "input";
const DEFAULT_OUTPUT_FILE: &str = "output/challenge1b_output.json";

#[derive(Parser)]
#[command(name = "sectionrank")]
#[command(version)]
#[command(about = "Rank persona-relevant sections across a directory of PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse every PDF in a directory and write the ranked report
    Run(RunArgs),

    /// Print the heading outline of one PDF as JSON
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show how a single line of text is normalized and scored
    Score {
        /// Line of text to score
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct RunArgs {
    /// Directory containing the PDF documents
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Persona configuration (defaults to <DIR>/persona_input.json)
    #[arg(short, long, value_name = "FILE", env = "SECTIONRANK_CONFIG")]
    config: Option<PathBuf>,

    /// Report output file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Abort on the first document that fails to open
    #[arg(long)]
    strict: bool,

    /// Analyse documents one at a time
    #[arg(long)]
    sequential: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_DIR),
            config: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            compact: false,
            strict: false,
            sequential: false,
        }
    }
}

impl RunArgs {
    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.input.join(PERSONA_CONFIG_FILE))
    }

    fn analyze_options(&self) -> AnalyzeOptions {
        let options = AnalyzeOptions::new().with_parallel(!self.sequential);
        if self.strict {
            options.strict()
        } else {
            options.lenient()
        }
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Outline { input, compact }) => cmd_outline(&input, compact),
        Some(Commands::Score { text }) => {
            cmd_score(&text);
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_run(&RunArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Configuration problems are fatal before any document is opened
    let config_path = args.config_path();
    let config = PersonaConfig::from_file(&config_path)?;
    log::debug!("Loaded persona configuration from {}", config_path.display());
    let paths = collect_pdf_paths(&args.input)?;

    if paths.is_empty() {
        println!(
            "{} {}",
            "No PDF documents found in".yellow(),
            args.input.display()
        );
    }

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = analyze_paths_with(&paths, &config, &args.analyze_options(), |path: &Path| {
        pb.set_message(document_name(path));
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    render::write_report(&report, &args.output, json_format(args.compact))?;

    let skipped = paths.len() - report.metadata.input_documents.len();
    println!("\n{}", "Summary".green().bold());
    println!(
        "  {} {} documents analysed",
        "├─".dimmed(),
        report.metadata.input_documents.len()
    );
    if skipped > 0 {
        println!(
            "  {} {}",
            "├─".dimmed(),
            format!("{} documents skipped", skipped).yellow()
        );
    }
    println!(
        "  {} {} sections ranked",
        "├─".dimmed(),
        report.section_count()
    );
    println!(
        "  {} {} {}",
        "└─".dimmed(),
        "Saved to".green(),
        args.output.display()
    );

    Ok(())
}

fn cmd_outline(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let outline = outline_file(input)?;

    let json = if compact {
        serde_json::to_string(&outline)?
    } else {
        serde_json::to_string_pretty(&outline)?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_score(text: &str) {
    let cleaned = normalize(text);

    println!("{}", "Line Score".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Normalized".bold(), cleaned);
    println!("{}: {}", "Words".bold(), cleaned.split_whitespace().count());
    println!("{}: {}", "Keywords".bold(), keyword_score(&cleaned));
    println!("{}: {}", "Complexity".bold(), complexity(&cleaned));

    match score_line(&cleaned) {
        Some(score) => {
            println!("{}: {}", "Weighted".bold(), score.weighted_score);
            println!("{}: {}", "Type".bold(), score.section_type);
            println!("{}: {}", "Summary".bold(), score.summary);
        }
        None => println!("{}", "Not relevant (below word or keyword threshold)".yellow()),
    }
}

fn cmd_version() {
    println!(
        "{} {}",
        "sectionrank".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Persona-driven PDF section ranking tool");
    println!();
    println!("License: MIT");
}
