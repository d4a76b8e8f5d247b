//! jparse CLI - judgment structure parser

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use judgment_parser::convert::{convert_files, ConvertOptions, ConvertResult, OutputFormat};
use judgment_parser::model::SourceDocument;
use judgment_parser::render::to_json;
use judgment_parser::{FamilyRegistry, JsonFormat, JudgmentParser, ParseOptions, RenderOptions};

#[derive(Parser)]
#[command(name = "jparse")]
#[command(version)]
#[command(about = "Convert extracted judgment documents to Akoma Ntoso XML", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert source documents (JSON) to Akoma Ntoso XML
    Convert {
        /// Input files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (stdout for a single input if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Document family
        #[arg(short, long, default_value = "ew", env = "JPARSE_FAMILY")]
        family: String,

        /// Tag quoted amendments and definitions
        #[arg(long)]
        amendments: bool,

        /// Write compact XML
        #[arg(long)]
        compact: bool,

        /// Omit the content hash
        #[arg(long)]
        no_hash: bool,
    },

    /// Print the parsed judgment tree as JSON
    Json {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document family
        #[arg(short, long, default_value = "ew", env = "JPARSE_FAMILY")]
        family: String,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show judgment metadata and structure statistics
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document family
        #[arg(short, long, default_value = "ew", env = "JPARSE_FAMILY")]
        family: String,
    },

    /// List the available document families
    Families,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            output,
            family,
            amendments,
            compact,
            no_hash,
        } => {
            let options = ConvertOptions::new()
                .with_family(family)
                .with_parse_options(ParseOptions::new().with_amendments(amendments))
                .with_render_options(RenderOptions::new().with_pretty(!compact).with_hash(!no_hash))
                .with_format(OutputFormat::Xml);
            cmd_convert(&inputs, output.as_deref(), &options)
        }
        Commands::Json {
            input,
            output,
            family,
            compact,
        } => cmd_json(&input, output.as_deref(), &family, compact),
        Commands::Info { input, family } => cmd_info(&input, &family),
        Commands::Families => {
            cmd_families();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path) -> Result<SourceDocument, Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let mut source: SourceDocument = serde_json::from_slice(&bytes)?;
    if source.name.is_none() {
        source.name = input.file_stem().map(|s| s.to_string_lossy().into_owned());
    }
    Ok(source)
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.xml", stem))
}

fn write_result(result: &ConvertResult, input: &Path, dir: &Path) -> std::io::Result<PathBuf> {
    let path = output_path(dir, input);
    fs::write(&path, &result.content)?;
    Ok(path)
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    FamilyRegistry::with_defaults().get(&options.family)?;
    log::debug!("Converting {} file(s) as '{}'", inputs.len(), options.family);

    let Some(dir) = output else {
        if let [input] = inputs {
            let result = judgment_parser::convert(load(input)?, options)?;
            println!("{}", result.content);
            return Ok(());
        }
        return Err("an output directory is required for multiple inputs".into());
    };
    fs::create_dir_all(dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Converting...");

    let results = convert_files(inputs, options);

    let mut failures = 0;
    for (input, result) in inputs.iter().zip(results) {
        pb.inc(1);
        match result.and_then(|r| write_result(&r, input, dir).map_err(Into::into)) {
            Ok(path) => pb.println(format!("{} {}", "Saved".green(), path.display())),
            Err(e) => {
                failures += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
            }
        }
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} converted, {} failed",
        "Summary:".bold(),
        inputs.len() - failures,
        failures
    );
    if failures > 0 && failures == inputs.len() {
        return Err("no document could be converted".into());
    }
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    family: &str,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let judgment = JudgmentParser::for_family(family)?.parse(load(input)?)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&judgment, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, family: &str) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions::new().with_family(family).with_stats(true);
    let result = judgment_parser::convert(load(input)?, &options)?;
    let meta = &result.metadata;

    println!("{}", "Judgment Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Family".bold(), family);
    if let Some(ref title) = meta.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref citation) = meta.citation {
        println!("{}: {}", "Citation".bold(), citation);
    }
    if let Some(ref court) = meta.court {
        println!("{}: {} ({})", "Court".bold(), court.name, court.code);
    }
    if let Some(date) = meta.date {
        println!("{}: {}", "Date".bold(), date);
    }
    if !meta.case_numbers.is_empty() {
        println!("{}: {}", "Case numbers".bold(), meta.case_numbers.join(", "));
    }
    for party in &meta.parties {
        let role = party.role.map(|r| r.as_str()).unwrap_or("party");
        println!("{}: {} ({})", "Party".bold(), party.name, role);
    }
    if !meta.judges.is_empty() {
        println!("{}: {}", "Judges".bold(), meta.judges.join(", "));
    }

    if let Some(stats) = result.stats {
        println!();
        println!("{}", "Structure Statistics".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Decisions".bold(), stats.decision_count);
        println!("{}: {}", "Big levels".bold(), stats.big_level_count);
        println!("{}: {}", "Cross-headings".bold(), stats.cross_heading_count);
        println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
        println!("{}: {}", "Subparagraphs".bold(), stats.subparagraph_count);
        println!("{}: {}", "Quoted structures".bold(), stats.quoted_structure_count);
        println!("{}: {}", "Tables".bold(), stats.table_count);
        println!("{}: {}", "Footnotes".bold(), stats.footnote_count);
        println!("{}: {}", "Annexes".bold(), stats.annex_count);
        println!("{}: {}", "Words".bold(), stats.word_count);
    }

    Ok(())
}

fn cmd_families() {
    let registry = FamilyRegistry::with_defaults();
    println!("{}", "Document Families".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for name in registry.names() {
        if let Ok(family) = registry.get(name) {
            println!("  {} {}", format!("{:<10}", name).bold(), family.description());
        }
    }
}
