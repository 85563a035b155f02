use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};

use relgraph::config::Config;
use relgraph::output::{dot, terminal};
use relgraph::pipeline::{self, RunOptions};
use relgraph::reddit::RedditClient;

/// relgraph: how popular subreddits relate through their commenters.
///
/// Reads recent comments from the most popular subreddits, links each one to
/// the subreddit its commenters most often also comment in, and draws the
/// resulting graph.
#[derive(Parser)]
#[command(name = "relgraph", version, about)]
struct Cli {
    /// Number of popular subreddits to analyze
    #[arg(long, default_value = "50")]
    communities: usize,

    /// Max recent comments to read per subreddit
    #[arg(long, default_value = "10000")]
    limit: usize,

    /// Where to write the DOT graph; the image goes next to it as .png
    #[arg(long, default_value = "relatedness.dot")]
    output: PathBuf,

    /// Graphviz layout engine used for the image
    #[arg(long, default_value = dot::DEFAULT_ENGINE)]
    engine: String,

    /// Only write the DOT file, don't run Graphviz
    #[arg(long)]
    no_render: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("relgraph=info")),
        )
        .init();

    let cli = Cli::parse();

    // Credentials are checked before anything touches the network.
    let config = Config::load()?;
    config.require_reddit()?;

    let client = RedditClient::login(&config).await?;

    let options = RunOptions {
        communities: cli.communities,
        comments_per_community: cli.limit,
        show_progress: true,
    };
    let run = pipeline::run(&client, &options).await?;

    if !run.failed.is_empty() {
        warn!(
            count = run.failed.len(),
            communities = ?run.failed,
            "Some subreddits could not be fetched and have no edges"
        );
    }

    terminal::display_nearest_relatives(&run.graph, &run.member_counts);

    dot::write_dot(&run.graph, &cli.output)?;
    println!("\nGraph written to {}", cli.output.display());

    if !cli.no_render {
        let image = cli.output.with_extension("png");
        if dot::render_image(&cli.output, &image, &cli.engine)? {
            println!("Image rendered to {}", image.display());
        } else {
            println!(
                "{}",
                format!(
                    "Install Graphviz to render an image, or run: {} -Tpng {} -o {}",
                    cli.engine,
                    cli.output.display(),
                    image.display()
                )
                .dimmed()
            );
        }
    }

    info!("Done");
    Ok(())
}
