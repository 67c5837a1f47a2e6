//! Interactive page behaviors, written as state machines over the host
//! traits in [`crate::dom`] and driven by a virtual clock.

pub mod announce;
pub mod reveal;
pub mod scroll;
pub mod session;
pub mod show_more;
pub mod timers;

pub use session::{NavState, PageSession};
pub use show_more::{ListSection, ShowMore};
