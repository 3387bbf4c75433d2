//! Shortcut filtering
//!
//! Narrows a batch of shortcuts before artwork is listed or fetched.

mod criteria;
mod engine;

pub use criteria::FilterCriteria;
pub use engine::FilterEngine;
