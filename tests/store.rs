use ghheat::model::{CommitRecord, CommitterCount};
use ghheat::report::build_report;
use ghheat::stats::{compute_heat, longest_streak, streak_summary, top_committers};
use ghheat::store::CommitStore;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

fn store() -> (TempDir, CommitStore) {
    let dir = tempdir().unwrap();
    let store = CommitStore::open(dir.path().join("commits.db")).unwrap();
    store.ensure_schema().unwrap();
    (dir, store)
}

fn record(sha: &str, login: &str, date: &str) -> CommitRecord {
    CommitRecord {
        sha: sha.to_string(),
        committer_login: login.to_string(),
        commit_date: date.to_string(),
        message: format!("commit {sha}"),
    }
}

fn counts(login: &str, commits: u32) -> CommitterCount {
    CommitterCount {
        login: login.to_string(),
        commits,
    }
}

#[test]
fn loading_twice_keeps_one_row_per_sha() {
    let (_dir, store) = store();
    let batch = vec![
        record("a", "alice", "2024-05-01T10:00:00Z"),
        record("b", "bob", "2024-05-01T11:00:00Z"),
        record("c", "alice", "2024-05-02T10:00:00Z"),
    ];

    assert_eq!(store.upsert(&batch).unwrap(), 3);
    assert_eq!(store.upsert(&batch).unwrap(), 0);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn first_write_wins_on_conflicting_sha() {
    let (_dir, store) = store();
    store
        .upsert(&[record("a", "alice", "2024-05-01T10:00:00Z")])
        .unwrap();
    store
        .upsert(&[record("a", "mallory", "2024-05-09T10:00:00Z")])
        .unwrap();

    let stored = store.get_commit("a").unwrap().unwrap();
    assert_eq!(stored.committer_login, "alice");
    assert_eq!(stored.commit_date, "2024-05-01T10:00:00Z");
    assert_eq!(stored.message, "commit a");
}

#[test]
fn ensure_schema_is_repeatable() {
    let (_dir, store) = store();
    store.ensure_schema().unwrap();
    store.ensure_schema().unwrap();
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn reset_then_load_leaves_only_new_records() {
    let (_dir, store) = store();
    store
        .upsert(&[
            record("old1", "alice", "2024-01-01T10:00:00Z"),
            record("old2", "bob", "2024-01-02T10:00:00Z"),
        ])
        .unwrap();

    store.drop_all().unwrap();
    store.drop_all().unwrap();
    store.ensure_schema().unwrap();
    store
        .upsert(&[record("new1", "carol", "2024-06-01T10:00:00Z")])
        .unwrap();

    assert_eq!(store.count().unwrap(), 1);
    assert!(store.contains("new1").unwrap());
    assert!(!store.contains("old1").unwrap());
}

#[test]
fn top_committers_orders_by_count_then_login() {
    let (_dir, store) = store();
    let mut batch = Vec::new();
    let mut n = 0;
    for (login, commits) in [("dave", 1), ("carol", 3), ("bob", 3), ("alice", 5)] {
        for _ in 0..commits {
            n += 1;
            batch.push(record(&format!("sha{n}"), login, "2024-05-01T10:00:00Z"));
        }
    }
    store.upsert(&batch).unwrap();

    assert_eq!(
        top_committers(&store, 2).unwrap(),
        vec![counts("alice", 5), counts("bob", 3)]
    );
    assert_eq!(top_committers(&store, 10).unwrap().len(), 4);
}

#[test]
fn empty_store_degrades_gracefully() {
    let (_dir, store) = store();

    assert!(top_committers(&store, 5).unwrap().is_empty());
    let streak = longest_streak(&store).unwrap();
    assert_eq!(streak, None);
    assert_eq!(streak_summary(streak.as_ref()), "No streaks found.");
    assert!(compute_heat(&store).unwrap().is_empty());
}

#[test]
fn queries_after_reset_see_an_empty_store() {
    let (_dir, store) = store();
    store
        .upsert(&[record("a", "alice", "2024-05-01T10:00:00Z")])
        .unwrap();
    store.drop_all().unwrap();

    assert!(top_committers(&store, 5).unwrap().is_empty());
    assert_eq!(longest_streak(&store).unwrap(), None);
}

#[test]
fn streak_skips_missing_day_and_collapses_same_day() {
    let (_dir, store) = store();
    store
        .upsert(&[
            record("1", "alice", "2024-05-01T09:00:00Z"),
            record("2", "alice", "2024-05-01T17:00:00Z"),
            record("3", "alice", "2024-05-02T09:00:00Z"),
            record("4", "alice", "2024-05-03T09:00:00Z"),
            record("5", "alice", "2024-05-05T09:00:00Z"),
            record("6", "bob", "2024-05-01T09:00:00Z"),
            record("7", "bob", "2024-05-02T09:00:00Z"),
        ])
        .unwrap();

    let streak = longest_streak(&store).unwrap().unwrap();
    assert_eq!(streak.login, "alice");
    assert_eq!(streak.days, 3);
    assert_eq!(
        streak_summary(Some(&streak)),
        "Longest streak: alice with 3 consecutive days"
    );
}

#[test]
fn heat_buckets_feed_the_report_grid() {
    let (_dir, store) = store();
    // 2024-05-05 is a Sunday.
    store
        .upsert(&[
            record("1", "alice", "2024-05-05T00:30:00Z"),
            record("2", "alice", "2024-05-05T01:30:00Z"),
            record("3", "bob", "2024-05-05T23:30:00Z"),
        ])
        .unwrap();

    let heat = compute_heat(&store).unwrap();
    let top = top_committers(&store, 5).unwrap();
    let streak = longest_streak(&store).unwrap();
    let (report, grid) = build_report(Some("octo/widgets".into()), 5, top, streak, heat).unwrap();

    assert_eq!(grid.get(0, 0), 1);
    assert_eq!(grid.get(0, 7), 2);
    assert_eq!(grid.total(), 3);
    assert_eq!(report.grid[0], vec![1, 0, 0, 0, 0, 0, 0, 2]);
    assert_eq!(
        report.summary.top_committers,
        "Top 5 Committers:\nalice: 2 commits\nbob: 1 commits"
    );
}
