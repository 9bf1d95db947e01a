pub mod client;
pub mod intake;
pub mod priority;
pub mod service;
