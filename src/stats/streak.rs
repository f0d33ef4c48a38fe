use crate::error::Result;
use crate::model::Streak;
use crate::store::CommitStore;
use crate::util::parse_commit_date;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

pub fn longest_streak(store: &CommitStore) -> Result<Option<Streak>> {
    let rows = store.commit_dates_by_committer()?;
    let mut dated = Vec::with_capacity(rows.len());
    for (login, raw) in rows {
        dated.push((login, parse_commit_date(&raw)?.date_naive()));
    }
    Ok(streaks_from_dates(dated))
}

/// Longest run of consecutive calendar days across all committers.
///
/// Dates are deduplicated per committer, then each sorted date is offset by
/// its rank: dates in one unbroken run share the same `day - rank` value.
/// The first maximal run wins, scanning committers alphabetically and runs
/// chronologically.
pub fn streaks_from_dates<I>(pairs: I) -> Option<Streak>
where
    I: IntoIterator<Item = (String, NaiveDate)>,
{
    let mut by_login: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for (login, date) in pairs {
        by_login.entry(login).or_default().insert(date);
    }

    let mut best: Option<Streak> = None;
    for (login, dates) in &by_login {
        let mut run: Option<(i64, NaiveDate, NaiveDate, u32)> = None;
        for (rank, date) in dates.iter().enumerate() {
            let group = date.num_days_from_ce() as i64 - rank as i64;
            run = match run {
                Some((g, start, _, len)) if g == group => Some((g, start, *date, len + 1)),
                Some((_, start, end, len)) => {
                    consider(&mut best, login, start, end, len);
                    Some((group, *date, *date, 1))
                }
                None => Some((group, *date, *date, 1)),
            };
        }
        if let Some((_, start, end, len)) = run {
            consider(&mut best, login, start, end, len);
        }
    }
    best
}

fn consider(best: &mut Option<Streak>, login: &str, start: NaiveDate, end: NaiveDate, days: u32) {
    if best.as_ref().map_or(true, |b| days > b.days) {
        *best = Some(Streak {
            login: login.to_string(),
            days,
            start,
            end,
        });
    }
}

pub fn streak_summary(streak: Option<&Streak>) -> String {
    match streak {
        Some(s) => format!(
            "Longest streak: {} with {} consecutive days",
            s.login, s.days
        ),
        None => "No streaks found.".to_string(),
    }
}
