use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghheat")]
#[command(about = "Fetch GitHub commit history and report top committers, streaks, and a day/hour heatmap")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, global = true, env = "GHHEAT_DB", default_value = crate::store::DEFAULT_DB_PATH, help = "Path to the SQLite commit database")]
    pub db: PathBuf,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct FetchArgs {
    #[arg(long, env = "GHHEAT_REPO", default_value = "apache/tvm", help = "Repository to analyze, as owner/name")]
    pub repo: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Bearer token for the GitHub API")]
    pub token: Option<String>,

    #[arg(long, env = "GHHEAT_API_URL", default_value = crate::github::DEFAULT_API_URL, help = "GitHub API base URL")]
    pub api_url: String,

    #[arg(long, default_value = "180days", help = "Lookback window, e.g. 180days or 12weeks")]
    pub since: humantime::Duration,

    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=100), help = "Commits requested per page")]
    pub per_page: u32,

    #[arg(long, default_value = "30s", help = "Per-request timeout")]
    pub timeout: humantime::Duration,
}

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    #[arg(long, default_value_t = 5, help = "Number of top committers to list")]
    pub top: usize,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long = "interactive", alias = "tui", conflicts_with = "json", help = "Show the heatmap in an interactive terminal UI")]
    pub interactive: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct RunArgs {
    #[clap(flatten)]
    pub fetch: FetchArgs,

    #[clap(flatten)]
    pub report: ReportArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the lookback window, load it, and report on the whole store (default)
    Run(RunArgs),
    /// Fetch the lookback window and load it without reporting
    Fetch(FetchArgs),
    /// Report on the stored commits without touching the network
    Report(ReportArgs),
    /// Drop the commits table
    Reset,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Run(args)) => crate::run::exec(&self.common, &args),
            Some(Commands::Fetch(args)) => crate::run::exec_fetch(&self.common, &args),
            Some(Commands::Report(args)) => crate::run::exec_report(&self.common, &args),
            Some(Commands::Reset) => crate::run::exec_reset(&self.common),
            None => {
                let args = RunArgs::parse_from([env!("CARGO_PKG_NAME")]);
                crate::run::exec(&self.common, &args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_run() {
        let cli = Cli::try_parse_from(["ghheat", "run", "--repo", "rust-lang/rust"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.fetch.repo, "rust-lang/rust");
        assert_eq!(args.report.top, 5);
        assert_eq!(args.fetch.per_page, 100);
        assert_eq!(*args.fetch.since, std::time::Duration::from_secs(180 * 24 * 3600));
    }

    #[test]
    fn global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["ghheat", "reset", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.common.db, PathBuf::from("/tmp/x.db"));
        assert!(matches!(cli.command, Some(Commands::Reset)));
    }

    #[test]
    fn log_level_follows_flags() {
        let cli = Cli::try_parse_from(["ghheat", "-v", "reset"]).unwrap();
        assert_eq!(cli.common.log_level(), tracing::Level::DEBUG);
        let cli = Cli::try_parse_from(["ghheat", "-q", "reset"]).unwrap();
        assert_eq!(cli.common.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn json_and_interactive_conflict() {
        assert!(Cli::try_parse_from(["ghheat", "report", "--json", "--interactive"]).is_err());
    }
}
