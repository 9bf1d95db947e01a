//! Domain logic for the clientdesk work tracker.
//!
//! Pure types and functions only: no I/O and no wall-clock reads outside
//! [`clock::Clock`]. The `db` and `api` crates build on top of this.

pub mod clock;
pub mod error;
pub mod intake;
pub mod priority;
pub mod service;
pub mod types;
