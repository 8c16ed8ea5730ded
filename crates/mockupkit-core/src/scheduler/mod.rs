//! Scheduling primitives for the editor's asynchronous edges.
//!
//! - [`Debouncer`]: coalesces bursts of edits into one notification and is
//!   cancelled when dropped.
//! - [`Generation`]: hands out [`LoadTicket`]s so late asset loads can tell
//!   whether the scene they were started for still exists.

mod debounce;
mod generation;

pub use debounce::Debouncer;
pub use generation::{Generation, LoadTicket};
