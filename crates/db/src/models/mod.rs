//! Stored record shapes.
//!
//! Each submodule contains the domain record, any create DTO, and the
//! `FromRow` row struct used by the SQLite repository.

pub mod journal_entry;
pub mod user;
