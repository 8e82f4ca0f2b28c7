//! Client side of the Ikigai journal.
//!
//! - [`draft`]: the local draft store the journal is written to on every edit.
//! - [`session`]: navigation, the draft document and its persistence combined.
//! - [`sync`]: explicit saves to and loads from the sync server.

pub mod draft;
pub mod error;
pub mod session;
pub mod sync;
