use crate::error::Result;
use crate::model::CommitterCount;
use crate::store::CommitStore;

pub fn top_committers(store: &CommitStore, n: usize) -> Result<Vec<CommitterCount>> {
    store.top_committers(n)
}

pub fn top_committers_summary(n: usize, committers: &[CommitterCount]) -> String {
    let mut out = format!("Top {n} Committers:");
    for c in committers {
        out.push_str(&format!("\n{}: {} commits", c.login, c.commits));
    }
    out
}
