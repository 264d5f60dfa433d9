use word_lookup::config::parse_relations;
use word_lookup::render::{loading_line, render_failure};
use word_lookup::session::run_interactive;
use word_lookup::view::WordView;
use word_lookup::{LookupConfig, LookupEngine, Word};

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "word-lookup")]
#[command(about = "Look up definitions, phonetics, frequency and related words")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: LookupOptions,

    /// Log lookups to stderr (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(ClapArgs)]
struct LookupOptions {
    /// Tell "word not found" and "service unreachable" apart in messages
    #[arg(long, global = true)]
    precise_errors: bool,

    /// Per-request timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Comma-separated relations to fetch (synonym,related,rhyme,frequency,sounds_like)
    #[arg(long, global = true)]
    relations: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single word
    Lookup {
        /// The word to look up
        word: String,

        /// Print the merged lookup result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Read words from stdin, one per line
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = LookupConfig::from_env()?;
    if args.options.precise_errors {
        config.precise_errors = true;
    }
    if let Some(secs) = args.options.timeout {
        config.timeout_secs = Some(secs);
    }
    if let Some(list) = &args.options.relations {
        config.relations = parse_relations(list)?;
    }
    info!(
        "Using dictionary at {} and relations at {}",
        config.dictionary_url, config.datamuse_url
    );

    let engine = LookupEngine::http(config)?;

    match args.command {
        Commands::Lookup { word, json } => run_lookup(&engine, &word, json).await,
        Commands::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_interactive(engine, stdin, tokio::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_lookup(engine: &LookupEngine, raw: &str, json: bool) -> Result<ExitCode> {
    let precise = engine.config().precise_errors;
    let word = match Word::parse(raw) {
        Ok(word) => word,
        Err(e) => {
            eprint!("{}", render_failure(raw, &e, precise));
            return Ok(ExitCode::from(2));
        }
    };

    if !json {
        eprintln!("{}", loading_line(word.as_str()));
    }

    match engine.lookup_word(&word).await {
        Ok(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(result) => {
            print!("{}", WordView::build(&result));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            info!("Lookup for '{}' failed: {}", word, e);
            eprint!("{}", render_failure(word.as_str(), &e, precise));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Filter used when `RUST_LOG` is unset. Degraded relation lookups log at
/// warn, so they show up without `-v`.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "word_lookup=debug"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
