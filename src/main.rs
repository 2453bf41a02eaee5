use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use wikispan::config::{Config, DEFAULT_LOG_FILTER};
use wikispan::{
    Error, Orchestrator, OrchestratorKind, PageContext, Result, Span, StrategyId, batch, catalog,
    logging, weight,
};

#[derive(Parser)]
#[command(
    name = "wikispan",
    about = "Parse historical date expressions into comparable spans"
)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one expression and print the span as JSON
    Parse {
        /// Date expression, e.g. "c. 450 BC", "11th–14th centuries"
        text: Vec<String>,
        /// Year of the page the text came from
        #[arg(long)]
        page_year: Option<u32>,
        /// Whether the page year is BC
        #[arg(long)]
        page_is_bc: Option<bool>,
        #[arg(long, value_enum)]
        orchestrator: Option<OrchestratorKind>,
        /// Run a single strategy instead of an orchestrator
        #[arg(long, conflicts_with = "orchestrator")]
        strategy: Option<StrategyId>,
    },
    /// Parse every *.jsonl fragment file under a directory → <output_dir>/*.spans.json
    Batch {
        input: PathBuf,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long, value_enum)]
        orchestrator: Option<OrchestratorKind>,
        #[arg(long)]
        threads: Option<usize>,
    },
    /// List strategy identifiers, or one orchestrator's precedence
    Strategies {
        #[arg(long, value_enum)]
        orchestrator: Option<OrchestratorKind>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref());
    let filter = if cli.verbose {
        "debug"
    } else {
        config
            .as_ref()
            .map_or(DEFAULT_LOG_FILTER, |c| c.log_filter.as_str())
    };
    if let Err(e) = logging::init(filter) {
        eprintln!("wikispan: {e}");
        return ExitCode::FAILURE;
    }

    let result = config.and_then(|config| match cli.command {
        Command::Parse {
            text,
            page_year,
            page_is_bc,
            orchestrator,
            strategy,
        } => run_parse(&text.join(" "), page_year, page_is_bc, orchestrator, strategy, &config),
        Command::Batch {
            input,
            output_dir,
            orchestrator,
            threads,
        } => run_batch(&input, output_dir, orchestrator, threads, &config),
        Command::Strategies { orchestrator } => {
            run_strategies(orchestrator);
            Ok(ExitCode::SUCCESS)
        }
    });

    result.unwrap_or_else(|e| {
        error!("{e}");
        ExitCode::FAILURE
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  PARSE MODE: one expression → JSON on stdout
// ═══════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ParseOutput<'a> {
    text: &'a str,
    page: PageContext,
    strategy: Option<StrategyId>,
    span: Option<Span>,
}

fn run_parse(
    text: &str,
    page_year: Option<u32>,
    page_is_bc: Option<bool>,
    orchestrator: Option<OrchestratorKind>,
    strategy: Option<StrategyId>,
    config: &Config,
) -> Result<ExitCode> {
    let year = page_year.or(config.page_year).ok_or(Error::MissingPageYear)?;
    let page = PageContext::new(year, page_is_bc.or(config.page_is_bc));

    let found = match strategy {
        Some(id) => catalog::build(id)
            .parse(text, &page)
            .map(|span| (id, weight::fill_weight(span))),
        None => Orchestrator::new(orchestrator.unwrap_or(config.orchestrator))
            .parse_with_id(text, &page),
    };
    let matched = found.is_some();
    let (strategy, span) = found.unzip();

    let output = ParseOutput {
        text,
        page,
        strategy,
        span,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    // Exit status 1 lets shell scripts test for a match.
    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  BATCH MODE: fragment files → span artifacts
// ═══════════════════════════════════════════════════════════════════════

fn run_batch(
    input: &std::path::Path,
    output_dir: Option<PathBuf>,
    orchestrator: Option<OrchestratorKind>,
    threads: Option<usize>,
    config: &Config,
) -> Result<ExitCode> {
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    let kind = orchestrator.unwrap_or(config.orchestrator);
    let written = batch::run_batch(input, &output_dir, kind, threads.or(config.threads))?;

    let mut total = 0;
    let mut matched = 0;
    for (path, stats) in &written {
        println!(
            "  {} ({}/{} matched)",
            path.display(),
            stats.matched,
            stats.total
        );
        total += stats.total;
        matched += stats.matched;
    }
    println!(
        "{} files, {matched}/{total} fragments matched ({})",
        written.len(),
        kind.as_str()
    );
    Ok(ExitCode::SUCCESS)
}

// ═══════════════════════════════════════════════════════════════════════
//  STRATEGIES MODE: identifiers and precedence
// ═══════════════════════════════════════════════════════════════════════

fn run_strategies(orchestrator: Option<OrchestratorKind>) {
    match orchestrator {
        Some(kind) => {
            println!("{} precedence:", kind.as_str());
            for (i, id) in kind.sequence().iter().enumerate() {
                println!("  {:>2}. {id}", i + 1);
            }
        }
        None => {
            for id in StrategyId::ALL {
                println!("{id}");
            }
        }
    }
}
