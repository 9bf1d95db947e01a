//! Row structs and DTOs.
//!
//! Row types derive `FromRow` and convert into the domain records from
//! `clientdesk_core`; create DTOs derive `Deserialize`.

pub mod client;
pub mod service;
