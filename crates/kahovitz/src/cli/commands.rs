//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kahovitz - multi-agent story generation and social posting
#[derive(Parser, Debug)]
#[command(name = "kahovitz")]
#[command(about = "Multi-agent story generation and social posting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Listen port, overrides `server.port`
        #[arg(short, long, env = "KAHOVITZ_PORT")]
        port: Option<u16>,
    },

    /// Refine a rough idea into a prompt, phase plan and opening scene
    Plan {
        /// The rough story idea
        idea: String,

        /// Print the plan as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate a full story and print it as Markdown
    Story(StoryArgs),

    /// Generate a post with the Xvitz agent and publish it to X
    AutoTweet {
        /// Prompt category (creative, writing, moscownpur, random)
        #[arg(short, long, default_value = "random")]
        category: String,

        /// Custom prompt, replaces the category prompt
        #[arg(long)]
        prompt: Option<String>,

        /// Generate the post without publishing it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Arguments for the `story` command.
#[derive(Args, Debug)]
pub struct StoryArgs {
    /// Rough idea to plan from
    #[arg(required_unless_present = "plan", conflicts_with = "plan")]
    pub idea: Option<String>,

    /// JSON plan file as produced by `kahovitz plan --json`
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Number of dialogue turns
    #[arg(short = 'n', long)]
    pub turns: Option<usize>,

    /// Turns between summaries
    #[arg(short = 'k', long)]
    pub interval: Option<usize>,

    /// Write the Markdown here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the story data as JSON to this file
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn story_takes_idea_or_plan() {
        let cli = Cli::try_parse_from(["kahovitz", "story", "a moon heist", "-n", "8", "-k", "4"])
            .unwrap();
        let Commands::Story(args) = cli.command else {
            panic!("expected story command");
        };
        assert_eq!(args.idea.as_deref(), Some("a moon heist"));
        assert_eq!(args.turns, Some(8));
        assert_eq!(args.interval, Some(4));

        assert!(Cli::try_parse_from(["kahovitz", "story"]).is_err());
        assert!(
            Cli::try_parse_from(["kahovitz", "story", "idea", "--plan", "plan.json"]).is_err()
        );
    }

    #[test]
    fn auto_tweet_defaults_to_random() {
        let cli = Cli::try_parse_from(["kahovitz", "--json-logs", "auto-tweet", "--dry-run"])
            .unwrap();
        assert!(cli.json_logs);
        match cli.command {
            Commands::AutoTweet {
                category, dry_run, ..
            } => {
                assert_eq!(category, "random");
                assert!(dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
