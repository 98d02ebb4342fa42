use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viral_coach::coach::{AbTestCase, Coach};
use viral_coach::config::CoachConfig;
use viral_coach::metrics::{MetricsInput, PerformanceMetrics};
use viral_coach::report::SentimentRecord;
use viral_coach::{format_float, format_percent};

#[derive(Parser)]
#[command(name = "viral-coach", about = "Marketing copy scoring and platform recommendation")]
struct Cli {
    /// TOML config file; defaults to $COACH_CONFIG_PATH or config/coach.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Score(ScoreArgs),
    Predict(PredictArgs),
    Compare(CompareArgs),
    Batch(BatchArgs),
    Sentiment(InputArgs),
    Metrics(InputArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ScoreArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct PredictArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    base_score: Option<f64>,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    #[arg(long)]
    a: String,
    #[arg(long)]
    b: String,
}

#[derive(Args, Debug, Clone)]
struct BatchArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    #[arg(long)]
    input: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = CoachConfig::load(cli.config)?;
    if let Some(path) = config_path.filter(|path| path.exists()) {
        info!(path = %path.display(), "loaded config");
    }
    let coach = Coach::from_config(&config)?;
    let command = cli.command.unwrap_or(Command::Score(ScoreArgs::default()));

    match command {
        Command::Score(args) => run_score(&coach, args),
        Command::Predict(args) => run_predict(&coach, args),
        Command::Compare(args) => run_compare(&coach, args),
        Command::Batch(args) => run_batch(&coach, args),
        Command::Sentiment(args) => run_sentiment(&coach, args),
        Command::Metrics(args) => run_metrics(args),
        Command::Serve(args) => viral_coach::server::serve(&args.host, args.port, coach).await,
    }
}

fn run_score(coach: &Coach, args: ScoreArgs) -> Result<(), String> {
    let text = read_text(args.text)?;
    let result = coach.score(&text);

    println!("Content score: {}", format_float(result.score, 3));
    if args.details {
        let components = result.components;
        println!("Weight scheme: {}", result.weight_scheme.label());
        println!("Words: {}", result.word_count);
        println!("  sentiment: {}", format_float(components.sentiment, 3));
        println!("  keyword_density: {}", format_float(components.keyword_density, 2));
        println!("  readability: {}", format_float(components.readability, 2));
        println!("  cta_strength: {}", format_float(components.cta_strength, 2));
        println!("  trend_alignment: {}", format_float(components.trend_alignment, 2));
    }
    Ok(())
}

fn run_predict(coach: &Coach, args: PredictArgs) -> Result<(), String> {
    if let Some(base) = args.base_score {
        if !(0.0..=1.0).contains(&base) {
            return Err(format!("invalid base score (0-1): {}", base));
        }
    }
    let text = read_text(args.text)?;
    let prediction = coach.predict(args.base_score, &text);

    println!("Base score: {}", format_float(prediction.base_score, 3));
    for entry in &prediction.scores {
        println!(
            "  {}: {} (modifier {:+.3})",
            entry.platform,
            format_float(entry.viral_score, 3),
            entry.modifier
        );
    }
    println!(
        "Best platform: {} ({}) at {}",
        prediction.best_platform,
        format_percent(prediction.best_score),
        coach.predictor().posting_time(&prediction.best_platform)
    );
    Ok(())
}

fn run_compare(coach: &Coach, args: CompareArgs) -> Result<(), String> {
    let score_a = coach.scorer().score(&args.a);
    let score_b = coach.scorer().score(&args.b);
    println!("Variant A score: {}", format_float(score_a, 3));
    println!("Variant B score: {}", format_float(score_b, 3));

    let recommendation = coach.recommend(Some(score_a), &args.a, Some(score_b), &args.b);
    println!("\n{}", recommendation.summary());
    Ok(())
}

fn run_batch(coach: &Coach, args: BatchArgs) -> Result<(), String> {
    let cases: Vec<AbTestCase> = read_json(&args.input)?;
    let report = coach.run_batch(&cases);

    for row in &report.predictions {
        println!(
            "{} | A {} vs B {} -> Variant {} on {} ({})",
            row.test_id,
            format_float(row.score_a, 3),
            format_float(row.score_b, 3),
            row.recommended_variant.label(),
            row.recommended_platform,
            row.recommended_posting_time
        );
    }
    println!(
        "\nTests: {} | A wins: {} | B wins: {}",
        report.results.len(),
        report.summary.a_wins,
        report.summary.b_wins
    );

    if let Some(path) = args.output {
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize batch report: {}", err))?;
        std::fs::write(&path, payload)
            .map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
        info!(path = %path.display(), "wrote batch report");
    }
    Ok(())
}

fn run_sentiment(coach: &Coach, args: InputArgs) -> Result<(), String> {
    let records: Vec<SentimentRecord> = read_json(&args.input)?;
    let report = coach.sentiment_report(&records);
    println!("{}", report.digest());
    Ok(())
}

fn run_metrics(args: InputArgs) -> Result<(), String> {
    let input: MetricsInput = read_json(&args.input)?;
    let metrics = PerformanceMetrics::from_input(&input);

    println!(
        "Video engagement: {}% | top: {}",
        format_float(metrics.video.avg_engagement, 2),
        metrics.video.top_content
    );
    println!(
        "Discussion engagement: {} | top: {}",
        format_float(metrics.discussion.avg_engagement, 2),
        metrics.discussion.top_content
    );
    println!(
        "Sentiment: avg {} | positive {}% | negative {}% | neutral {}%",
        format_float(metrics.sentiment.avg_sentiment, 3),
        format_float(metrics.sentiment.pos_pct, 1),
        format_float(metrics.sentiment.neg_pct, 1),
        format_float(metrics.sentiment.neu_pct, 1)
    );
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err))
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        return Ok(text);
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing text: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("viral_coach=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
