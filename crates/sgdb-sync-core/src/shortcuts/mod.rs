//! Non-Steam shortcut discovery
//!
//! Recovers shortcut records from a user's binary `shortcuts.vdf` container.

pub mod model;
pub mod reader;

pub use model::*;
pub use reader::ShortcutReader;
