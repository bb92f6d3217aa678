use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use resonance_cipher::standard_registry;
use resonance_engine::{
    render_connections, render_report, ComputeRequest, ConnectLimits, EngineConfig,
    ResonanceEngine,
};
use resonance_lexicon::{Lexicon, LexiconProvider, PhraseQuotas};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "resonance")]
#[command(about = "Cipher resonances and lexicon phrases for text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute resonance numbers and matching phrases
    Compute(ComputeArgs),

    /// Append phrase/number associations to an additions file
    Record(RecordArgs),

    /// List the available ciphers
    Ciphers(CiphersArgs),

    /// Start from a number: draw its phrases, score them and list the
    /// phrases filed under each score
    Connect(ConnectArgs),

    /// List the phrases filed under a number
    Lookup(LookupArgs),
}

#[derive(Args)]
struct LexiconArgs {
    /// Corpus lexicon file (`tag|phrase|number`, repeatable)
    #[arg(long)]
    corpus: Vec<PathBuf>,

    /// Word lexicon file (`phrase:number[:number...]`, repeatable)
    #[arg(long)]
    words: Vec<PathBuf>,

    /// Additions file (`phrase|number`)
    #[arg(long)]
    additions: Option<PathBuf>,
}

#[derive(Args)]
struct ComputeArgs {
    /// Phrases to compute
    texts: Vec<String>,

    /// Read more phrases from a file, one per line
    #[arg(long)]
    file: Option<PathBuf>,

    /// Cipher ids to report and unfold (repeatable, default: all)
    #[arg(long = "cipher", value_name = "ID")]
    ciphers: Vec<String>,

    #[command(flatten)]
    lexicon: LexiconArgs,

    /// Keep only prime resonance numbers
    #[arg(long)]
    prime_only: bool,

    /// Max single-word phrases per number
    #[arg(long)]
    single: Option<usize>,

    /// Max two-word phrases per number
    #[arg(long)]
    two: Option<usize>,

    /// Max three-word phrases per number
    #[arg(long)]
    three: Option<usize>,

    /// Max four- and five-word phrases per number
    #[arg(long)]
    four_five: Option<usize>,

    /// Seed for phrase shuffling (reproducible output)
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of the markdown report
    #[arg(long)]
    json: bool,

    /// Record each phrase against its final numbers in the --additions file
    #[arg(long, requires = "additions")]
    save: bool,
}

#[derive(Args)]
struct RecordArgs {
    /// Phrase to associate
    phrase: String,

    /// Numbers to associate it with
    #[arg(required = true)]
    numbers: Vec<u64>,

    /// Additions file to append to
    #[arg(long)]
    additions: PathBuf,
}

#[derive(Args)]
struct CiphersArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConnectArgs {
    /// Number to start from
    number: u64,

    #[command(flatten)]
    lexicon: LexiconArgs,

    /// Max phrases drawn for the number
    #[arg(long)]
    initial: Option<usize>,

    /// Max phrases listed for each score
    #[arg(long)]
    connected: Option<usize>,

    /// Seed for phrase shuffling (reproducible output)
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of the markdown listing
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LookupArgs {
    /// Number to look up
    number: u64,

    #[command(flatten)]
    lexicon: LexiconArgs,

    /// Max phrases to print
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Compute(args) => args.json,
        Commands::Ciphers(args) => args.json,
        Commands::Connect(args) => args.json,
        Commands::Lookup(args) => args.json,
        Commands::Record(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Compute(args) => run_compute(args, config)?,
        Commands::Record(args) => run_record(args)?,
        Commands::Ciphers(args) => run_ciphers(args)?,
        Commands::Connect(args) => run_connect(args, config)?,
        Commands::Lookup(args) => run_lookup(args)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn collect_phrases(args: &ComputeArgs) -> Result<Vec<String>> {
    let mut phrases: Vec<String> = args
        .texts
        .iter()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    if let Some(path) = &args.file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read phrases from {}", path.display()))?;
        phrases.extend(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    if phrases.is_empty() {
        bail!("No phrases given; pass TEXT arguments or --file");
    }
    Ok(phrases)
}

fn resolve_quotas(args: &ComputeArgs, defaults: PhraseQuotas) -> PhraseQuotas {
    PhraseQuotas {
        single_words: args.single.unwrap_or(defaults.single_words),
        two_word_phrases: args.two.unwrap_or(defaults.two_word_phrases),
        three_word_phrases: args.three.unwrap_or(defaults.three_word_phrases),
        four_five_word_phrases: args.four_five.unwrap_or(defaults.four_five_word_phrases),
    }
}

fn build_lexicon(args: &LexiconArgs) -> Result<Lexicon> {
    let mut builder = Lexicon::builder();
    for path in &args.corpus {
        builder = builder.corpus_file(path);
    }
    for path in &args.words {
        builder = builder.words_file(path);
    }
    if let Some(path) = &args.additions {
        builder = builder.additions_file(path);
    }
    builder.build().context("Failed to load lexicon")
}

fn rng_from(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn run_compute(args: ComputeArgs, mut config: EngineConfig) -> Result<()> {
    if args.prime_only {
        config.prime_only = true;
    }
    let quotas = resolve_quotas(&args, config.quotas);
    let engine = ResonanceEngine::new(config).context("Invalid engine configuration")?;
    let phrases = collect_phrases(&args)?;
    let mut lexicon = build_lexicon(&args.lexicon)?;
    let mut rng = rng_from(args.seed);

    let mut results = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        let request = ComputeRequest::new(phrase)
            .with_ciphers(args.ciphers.iter().cloned())
            .with_quotas(quotas);
        let result = engine
            .compute(&request, &lexicon, &mut rng)
            .with_context(|| format!("Failed to compute resonance for {:?}", request.text))?;
        if args.save {
            let written = engine
                .record(&result, &mut lexicon)
                .with_context(|| format!("Failed to save {:?}", result.text))?;
            log::info!("Saved {written} association(s) for {:?}", result.text);
        }
        results.push(result);
    }

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&results)?)?;
    } else {
        let reports: Vec<String> = results.iter().map(render_report).collect();
        print_stdout(reports.join("\n").trim_end())?;
    }
    Ok(())
}

fn run_record(args: RecordArgs) -> Result<()> {
    let mut lexicon = Lexicon::builder()
        .additions_file(&args.additions)
        .build()
        .context("Failed to load additions file")?;
    let numbers: BTreeSet<u64> = args.numbers.into_iter().collect();
    let written = lexicon
        .record(&args.phrase, &numbers)
        .with_context(|| format!("Failed to record {:?}", args.phrase))?;
    print_stdout(&format!(
        "Recorded {written} association(s) for {:?} in {}",
        args.phrase.trim(),
        args.additions.display()
    ))
}

fn run_ciphers(args: CiphersArgs) -> Result<()> {
    let registry = standard_registry();
    if args.json {
        let list: Vec<serde_json::Value> = registry
            .iter()
            .map(|c| serde_json::json!({ "id": c.id(), "label": c.label() }))
            .collect();
        return print_stdout(&serde_json::to_string_pretty(&list)?);
    }
    let width = registry.ids().map(str::len).max().unwrap_or(0);
    let lines: Vec<String> = registry
        .iter()
        .map(|c| format!("{:width$}  {}", c.id(), c.label()))
        .collect();
    print_stdout(&lines.join("\n"))
}

fn run_connect(args: ConnectArgs, config: EngineConfig) -> Result<()> {
    let defaults = config.connect_limits;
    let limits = ConnectLimits {
        initial: args.initial.unwrap_or(defaults.initial),
        connected: args.connected.unwrap_or(defaults.connected),
    };
    let engine = ResonanceEngine::new(config).context("Invalid engine configuration")?;
    let lexicon = build_lexicon(&args.lexicon)?;
    let mut rng = rng_from(args.seed);
    let result = engine
        .connect(args.number, limits, &lexicon, &mut rng)
        .with_context(|| format!("Failed to connect {}", args.number))?;

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&result)?)
    } else {
        print_stdout(render_connections(&result).trim_end())
    }
}

fn run_lookup(args: LookupArgs) -> Result<()> {
    let lexicon = build_lexicon(&args.lexicon)?;
    let mut phrases = lexicon.lookup(args.number);
    phrases.sort();
    phrases.dedup();
    phrases.truncate(args.limit);

    if args.json {
        let body = serde_json::json!({ "number": args.number, "phrases": phrases });
        return print_stdout(&serde_json::to_string_pretty(&body)?);
    }
    if phrases.is_empty() {
        return print_stdout("No phrases found.");
    }
    let lines: Vec<String> = phrases.iter().map(|phrase| format!("- {phrase}")).collect();
    print_stdout(&lines.join("\n"))
}
