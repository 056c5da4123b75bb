//! Music library model and scanner.
//!
//! The scanner walks a directory tree, reads tags from every recognized
//! audio file and groups the results into [`Album`]s sorted the way the
//! sidebar displays them.

mod model;
mod scan;

pub use model::{Album, Track};
pub use scan::scan;
