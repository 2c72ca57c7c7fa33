//! rusty-forum/crates/services/src/lib.rs
//!
//! Domain operations over the `domains` types: the reply-tree engine, the
//! vote tally and reputation calculator, and the thread service that works
//! on freshly loaded aggregates and persists them whole.

pub mod reply_tree;
pub mod threads;
pub mod votes;

pub use threads::{ThreadPatch, ThreadService};
pub use votes::VoteOutcome;
