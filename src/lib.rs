pub mod cli;
pub mod error;
pub mod github;
pub mod model;
pub mod report;
pub mod run;
pub mod stats;
pub mod store;
pub mod util;
