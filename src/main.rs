use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gh_moles::cleanup::policy::Policy;
use gh_moles::cleanup::{run_cleanup, CleanupOptions};
use gh_moles::config::AppConfig;
use gh_moles::context::resolve_repository;
use gh_moles::platform::github::GitHubPlatform;

#[derive(Parser)]
#[command(
    name = "gh-moles",
    version,
    about = "GitHub CLI extension with tools for GitHub repositories",
    long_about = "gh-moles is a GitHub CLI extension that provides various tools for managing \
                  GitHub repositories.\n\nInstall it with:\n\n  gh extension install the78mole/gh-moles-extra\n\n\
                  Then use it as:\n\n  gh moles <command>"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage GitHub Actions workflow runs
    #[command(subcommand)]
    Run(RunCommand),
}

#[derive(Subcommand)]
enum RunCommand {
    /// Delete old GitHub Actions workflow runs
    #[command(long_about = CLEANUP_LONG_ABOUT)]
    Cleanup(CleanupArgs),
}

const CLEANUP_LONG_ABOUT: &str = "\
Delete old workflow runs, keeping only the most recent ones OR delete all failed runs.

Examples:
  gh moles run cleanup           # Keep 20 most recent runs (with confirmation)
  gh moles run cleanup -y        # Keep 20 most recent runs (no confirmation)
  gh moles run cleanup 50        # Keep 50 most recent runs (with confirmation)
  gh moles run cleanup -y 50     # Keep 50 most recent runs (no confirmation)
  gh moles run cleanup --failed  # Delete all failed runs (with confirmation)
  gh moles run cleanup -y -f     # Delete all failed runs (no confirmation)";

#[derive(Args)]
struct CleanupArgs {
    /// Number of most recent runs to keep (default 20)
    #[arg(value_name = "KEEP_COUNT")]
    keep_count: Option<String>,

    /// Skip confirmation prompt (auto-confirm deletion)
    #[arg(short, long)]
    yes: bool,

    /// Delete all failed runs instead of keeping recent ones
    #[arg(short, long)]
    failed: bool,

    /// Repository to clean up, as OWNER/NAME (defaults to the current git repository)
    #[arg(short = 'R', long, value_name = "OWNER/NAME")]
    repo: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the interactive output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(RunCommand::Cleanup(args)) => cleanup(cli.config.as_deref(), args).await,
    }
}

async fn cleanup(config_path: Option<&str>, args: CleanupArgs) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)?;

    let policy = Policy::from_args(
        args.keep_count.as_deref(),
        args.failed,
        config.cleanup.default_keep_count,
    )?;
    let options = CleanupOptions::new(policy, args.yes, &config.cleanup);

    let cwd = std::env::current_dir()?;
    let repo = resolve_repository(args.repo.as_deref(), &cwd).await?;
    let platform = GitHubPlatform::new(&config.github).await?;

    tracing::info!(repo = %repo, policy = %policy, auto_confirm = args.yes, "Starting cleanup");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = run_cleanup(
        &platform,
        &repo,
        &options,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .await?;

    tracing::info!(repo = %repo, outcome = ?outcome, "Cleanup finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse_cleanup(args: &[&str]) -> CleanupArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Run(RunCommand::Cleanup(args)) => args,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cleanup_defaults() {
        let args = parse_cleanup(&["gh-moles", "run", "cleanup"]);
        assert_eq!(args.keep_count, None);
        assert!(!args.yes);
        assert!(!args.failed);
        assert_eq!(args.repo, None);
    }

    #[test]
    fn test_cleanup_short_flags() {
        let args = parse_cleanup(&["gh-moles", "run", "cleanup", "-y", "-f"]);
        assert!(args.yes);
        assert!(args.failed);
    }

    #[test]
    fn test_cleanup_long_flags_and_keep_count() {
        let args = parse_cleanup(&[
            "gh-moles", "run", "cleanup", "--yes", "50", "--repo", "octo/hello",
        ]);
        assert!(args.yes);
        assert_eq!(args.keep_count.as_deref(), Some("50"));
        assert_eq!(args.repo.as_deref(), Some("octo/hello"));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["gh-moles", "run", "cleanup", "-c", "moles.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("moles.toml"));
    }

    #[test]
    fn test_at_most_one_positional() {
        assert!(Cli::try_parse_from(["gh-moles", "run", "cleanup", "10", "20"]).is_err());
    }
}
