use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use ghprofiler::export;
use ghprofiler::models::UserProfile;
use ghprofiler::{Config, DemoSource, GitHubClient, ProfilePipeline, RankingStrategy};

#[derive(Parser, Debug)]
#[command(name = "ghprofiler")]
#[command(version)]
#[command(about = "Fetch, score and browse a GitHub user's public profile")]
struct Args {
    /// GitHub username to analyze (prompted for in the TUI when omitted)
    username: Option<String>,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tui, global = true)]
    format: OutputFormat,

    /// Scoring model used for the ranking
    #[arg(long, value_enum, default_value_t = RankingStrategy::Continuous, global = true)]
    scoring: RankingStrategy,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a built-in sample profile without touching the network
    Demo,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Tui,
    Json,
    Html,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(args.format)?;

    let config = Config::from_env()?.with_token(args.token.clone());

    let (pipeline, username) = match args.command {
        Some(Commands::Demo) => (
            ProfilePipeline::new(DemoSource::new(), args.scoring),
            Some(ghprofiler::github::DEMO_LOGIN.to_string()),
        ),
        None => {
            if config.github_token.is_none() {
                tracing::warn!("No GitHub token configured; unauthenticated rate limits apply");
            }
            (
                ProfilePipeline::new(GitHubClient::new(&config)?, args.scoring),
                args.username.clone(),
            )
        }
    };

    match args.format {
        OutputFormat::Tui => {
            ghprofiler::ui::run(Arc::new(pipeline), username).await?;
        }
        format => {
            let username = username.ok_or_else(|| {
                anyhow::anyhow!("a username is required for --format {:?}", format)
            })?;
            let profile = fetch_with_spinner(&pipeline, &username).await?;
            write_output(&profile, format, &config)?;
        }
    }

    Ok(())
}

/// The TUI owns the screen, so logging stays off there unless RUST_LOG asks for it.
fn init_logging(format: OutputFormat) -> anyhow::Result<()> {
    let filter = if format == OutputFormat::Tui {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    } else {
        EnvFilter::from_default_env()
            .add_directive("ghprofiler=info".parse()?)
            .add_directive("reqwest=warn".parse()?)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn fetch_with_spinner(
    pipeline: &ProfilePipeline,
    username: &str,
) -> anyhow::Result<UserProfile> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!(
        "Fetching GitHub data for {} via {}...",
        username,
        pipeline.source_name()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline.analyze_user(username).await;
    spinner.finish_and_clear();
    Ok(result?)
}

fn write_output(
    profile: &UserProfile,
    format: OutputFormat,
    config: &Config,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", export::render_json(profile)?),
        OutputFormat::Html => {
            let path = export::write_html(profile, &config.output_dir)?;
            println!("{}", path.display());
        }
        OutputFormat::Tui => {}
    }
    Ok(())
}
