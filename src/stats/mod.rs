pub mod heat;
pub mod streak;
pub mod top;

pub use heat::{compute_heat, heat_cells};
pub use streak::{longest_streak, streak_summary, streaks_from_dates};
pub use top::{top_committers, top_committers_summary};
