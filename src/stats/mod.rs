//! Daily record computation: the window, the match tally and the rank lookup.

mod aggregate;
mod rank;
mod window;

pub use aggregate::aggregate;
pub use rank::rank_for_queue;
pub use window::{DailyWindow, crossed_boundary};
