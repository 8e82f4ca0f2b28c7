//! Domain core for the Ikigai journal.
//!
//! Pure data and rules with no I/O: the fixed-shape response document, the
//! step navigation state machine, summary derivation and the journal entry
//! wire types shared by the server and the client.

pub mod entry;
pub mod error;
pub mod navigation;
pub mod responses;
pub mod summary;
pub mod types;
