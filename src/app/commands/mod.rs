pub mod actions;
pub mod list;
pub mod session;
pub mod show;
pub mod snapshot;
pub mod stats;
