use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use scorekeeper::client::{FileStore, HttpRemote, ScoreClient};
use scorekeeper::config::{Config, InvalidPayloadPolicy};
use scorekeeper::score::ScorePayload;
use scorekeeper::server::{init_tracing, ScoreServer};
use scorekeeper::view::ScoreView;

#[derive(Debug, Parser)]
#[command(name = "scorekeeper", version, about = "Track a current and high score")]
struct Cli {
    /// Config file (default: ~/.config/scorekeeper/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the score API server
    Serve {
        /// Bind address (host:port)
        #[arg(long)]
        bind: Option<String>,
        /// Handling of non-numeric scores: ignore or reject
        #[arg(long, value_parser = parse_policy)]
        invalid_payload: Option<InvalidPayloadPolicy>,
    },
    /// Show the current and high score
    Show(ClientArgs),
    /// Add one point to the current score
    Add(ClientArgs),
    /// Set the current score to an absolute value
    Set {
        #[arg(allow_negative_numbers = true)]
        score: i64,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Reset the current score, keeping the high score
    Reset(ClientArgs),
}

#[derive(Debug, clap::Args)]
struct ClientArgs {
    /// Server base URL
    #[arg(long)]
    server: Option<String>,
    /// Local fallback file
    #[arg(long)]
    fallback: Option<PathBuf>,
}

fn parse_policy(s: &str) -> Result<InvalidPayloadPolicy, String> {
    InvalidPayloadPolicy::parse(s).ok_or_else(|| format!("expected 'ignore' or 'reject', got '{}'", s))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Serve {
            bind,
            invalid_payload,
        } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            if let Some(policy) = invalid_payload {
                config.server.invalid_payload = policy;
            }
            config.validate()?;
            serve(&config).await
        }
        Command::Show(args) => {
            let client = build_client(&mut config, args)?;
            let mut view = ScoreView::new();
            view.apply_initial(client.fetch_initial().await);
            finish(&view)
        }
        Command::Add(args) => {
            let client = build_client(&mut config, args)?;
            let mut view = ScoreView::new();
            view.apply_initial(client.fetch_initial().await);
            if !view.has_error() {
                view.apply_submit(client.submit_score(view.next_score()).await);
            }
            finish(&view)
        }
        Command::Set { score, client } => {
            let client = build_client(&mut config, client)?;
            let mut view = ScoreView::new();
            view.apply_submit(client.submit_score(ScorePayload { score }).await);
            finish(&view)
        }
        Command::Reset(args) => {
            let client = build_client(&mut config, args)?;
            let mut view = ScoreView::new();
            view.apply_initial(client.fetch_initial().await);
            if !view.has_error() && view.can_reset() {
                view.apply_reset(client.reset_current().await);
            }
            finish(&view)
        }
    }
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let mut server = ScoreServer::new(config);
    server
        .try_bind()
        .await
        .map_err(|e| anyhow!("{}", e))
        .context("Failed to start server")?;
    server.run().await.map_err(|e| anyhow!("{}", e))
}

fn build_client(
    config: &mut Config,
    args: ClientArgs,
) -> anyhow::Result<ScoreClient<HttpRemote, FileStore>> {
    if let Some(server) = args.server {
        config.client.base_url = server;
    }
    if let Some(fallback) = args.fallback {
        config.client.fallback_path = Some(fallback);
    }
    config.validate()?;

    let remote = HttpRemote::new(&config.client)?;
    let store = FileStore::new(config.client.fallback_path());
    tracing::debug!(
        endpoint = remote.endpoint(),
        fallback = %store.path().display(),
        "Score client ready"
    );
    Ok(ScoreClient::new(remote, store))
}

fn finish(view: &ScoreView) -> anyhow::Result<()> {
    println!("{}", view.render());
    match &view.error {
        Some(error) => Err(anyhow!("{}", error)),
        None => Ok(()),
    }
}
