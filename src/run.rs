use crate::cli::{CommonArgs, FetchArgs, ReportArgs, RunArgs};
use crate::github::{fetch_commits, FetchConfig, FetchOutcome, HttpPageSource};
use crate::model::RepoSpec;
use crate::report::{build_report, render, OutputFormat};
use crate::stats::{compute_heat, longest_streak, top_committers};
use crate::store::CommitStore;
use anyhow::Context;
use chrono::Utc;
use tracing::info;

/// Fetch, load, and report in one pass. Aggregates cover the whole store,
/// not just the freshly fetched window.
pub fn exec(common: &CommonArgs, args: &RunArgs) -> anyhow::Result<()> {
    let store = CommitStore::open(&common.db).context("Failed to open commit store")?;
    let format = OutputFormat::from_flags(args.report.json, args.report.interactive);

    let show_progress = !common.quiet && format != OutputFormat::Json;
    fetch_and_load(&store, &args.fetch, show_progress)?;

    report(&store, &args.report, Some(args.fetch.repo.clone()))
}

pub fn exec_fetch(common: &CommonArgs, args: &FetchArgs) -> anyhow::Result<()> {
    let store = CommitStore::open(&common.db).context("Failed to open commit store")?;
    let (outcome, inserted) = fetch_and_load(&store, args, !common.quiet)?;
    let total = store.count().context("Failed to count stored commits")?;

    println!(
        "Fetched {} commits over {} pages ({} skipped), {} new, {} stored{}",
        outcome.records.len(),
        outcome.pages,
        outcome.skipped,
        inserted,
        total,
        if outcome.complete { "" } else { " (partial)" }
    );
    Ok(())
}

pub fn exec_report(common: &CommonArgs, args: &ReportArgs) -> anyhow::Result<()> {
    let store = CommitStore::open(&common.db).context("Failed to open commit store")?;
    report(&store, args, None)
}

pub fn exec_reset(common: &CommonArgs) -> anyhow::Result<()> {
    let store = CommitStore::open(&common.db).context("Failed to open commit store")?;
    store.drop_all().context("Failed to drop commits table")?;
    info!(db = %store.path().display(), "dropped commits table");
    Ok(())
}

fn fetch_config(args: &FetchArgs, show_progress: bool) -> anyhow::Result<FetchConfig> {
    let repo: RepoSpec = args.repo.parse().context("Invalid --repo")?;
    Ok(FetchConfig {
        api_url: args.api_url.clone(),
        repo,
        lookback: *args.since,
        per_page: args.per_page,
        show_progress,
    })
}

fn fetch_and_load(
    store: &CommitStore,
    args: &FetchArgs,
    show_progress: bool,
) -> anyhow::Result<(FetchOutcome, usize)> {
    let config = fetch_config(args, show_progress)?;
    let source = HttpPageSource::new(args.token.clone(), *args.timeout)
        .context("Failed to build HTTP client")?;

    let outcome = fetch_commits(&source, &config, Utc::now()).context("Failed to fetch commits")?;

    store.ensure_schema().context("Failed to create commits table")?;
    let inserted = store
        .upsert(&outcome.records)
        .context("Failed to store commits")?;
    info!(fetched = outcome.records.len(), inserted, "commits loaded");

    Ok((outcome, inserted))
}

fn report(store: &CommitStore, args: &ReportArgs, repository: Option<String>) -> anyhow::Result<()> {
    let top = top_committers(store, args.top).context("Failed to query top committers")?;
    let streak = longest_streak(store).context("Failed to compute longest streak")?;
    let heat = compute_heat(store).context("Failed to compute heatmap buckets")?;

    let (report, grid) = build_report(repository, args.top, top, streak, heat)
        .context("Heatmap buckets do not match the report grid")?;

    render(&report, &grid, OutputFormat::from_flags(args.json, args.interactive))
}
