use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use photopost::{Config, JsonUsageFile, RenderJob, Studio, UsageSource};

#[derive(Parser, Debug)]
#[command(name = "photopost", version)]
struct Cli {
    /// YAML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, env = "PHOTOPOST_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Frame a photo on the post background with a caption.
    Post(PostArgs),
    /// Render a time-tracking stats card for the period named in the caption.
    Stats(StatsArgs),
    /// Print the date range a caption resolves to, as JSON.
    Range(RangeArgs),
}

#[derive(Parser, Debug)]
struct PostArgs {
    /// Input photo.
    #[arg(long)]
    photo: PathBuf,

    /// Caption text drawn under the photo.
    #[arg(long, default_value = "")]
    caption: String,

    /// Output path; `.jpg`/`.jpeg` writes JPEG, anything else PNG. Defaults to a file in
    /// the configured temp dir.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Chat the render is admitted for.
    #[arg(long, default_value_t = 0)]
    chat: i64,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Caption naming the period, e.g. "ИЮНЬ 2024" or "2023".
    #[arg(long)]
    caption: String,

    /// Output path; defaults to a PNG in the configured temp dir.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Optional photo shown above the activity bar.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Read usage from a JSON export instead of the reporting API.
    #[arg(long)]
    usage: Option<PathBuf>,

    /// Date the caption is resolved against (defaults to the local date).
    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(long, default_value_t = 0)]
    chat: i64,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    #[arg(long)]
    caption: String,

    #[arg(long)]
    today: Option<NaiveDate>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Post(args) => cmd_post(&cli.config, args),
        Command::Stats(args) => cmd_stats(&cli.config, args),
        Command::Range(args) => cmd_range(args),
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photopost=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_studio(config_path: &std::path::Path) -> anyhow::Result<(Config, Studio)> {
    let config = Config::load(config_path)
        .with_context(|| format!("load config '{}'", config_path.display()))?;
    let studio = Studio::from_config(&config).context("load assets")?;
    Ok((config, studio))
}

fn cmd_post(config_path: &std::path::Path, args: PostArgs) -> anyhow::Result<()> {
    let (_, studio) = load_studio(config_path)?;
    let job = RenderJob {
        photo_path: Some(args.photo),
        caption: args.caption,
        output_path: args
            .out
            .unwrap_or_else(|| studio.scratch_path(args.chat, "post", "jpg")),
    };
    let out = studio.render_post_job(args.chat, &job)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_stats(config_path: &std::path::Path, args: StatsArgs) -> anyhow::Result<()> {
    let (config, studio) = load_studio(config_path)?;
    let source: Box<dyn UsageSource> = match &args.usage {
        Some(path) => Box::new(JsonUsageFile::load(path)?),
        None => Box::new(
            config
                .reporting
                .client()
                .context("reporting API is not configured; pass --usage to render offline")?,
        ),
    };

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let job = RenderJob {
        photo_path: args.photo,
        caption: args.caption,
        output_path: args
            .out
            .unwrap_or_else(|| studio.scratch_path(args.chat, "stats", "png")),
    };
    let out = studio.render_stats_job(args.chat, &job, source.as_ref(), today)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let range = photopost::parse_caption_date_range(&args.caption, today)?;
    println!("{}", serde_json::to_string(&range)?);
    Ok(())
}
