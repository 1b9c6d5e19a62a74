//! Kahovitz CLI binary.
//!
//! - Run the HTTP server
//! - Plan and generate stories from the terminal
//! - Generate and publish a post with the Xvitz agent

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, auto_tweet, plan_story, run_server, write_story};

    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    kahovitz::init_logging(log_level, cli.json_logs).map_err(|e| anyhow::anyhow!(e))?;

    let config = kahovitz::KahovitzConfig::load()?;

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }

        Commands::Plan { idea, json } => {
            plan_story(config, &idea, json).await?;
        }

        Commands::Story(args) => {
            write_story(config, args).await?;
        }

        Commands::AutoTweet {
            category,
            prompt,
            dry_run,
        } => {
            auto_tweet(config, &category, prompt.as_deref(), dry_run).await?;
        }
    }

    Ok(())
}
