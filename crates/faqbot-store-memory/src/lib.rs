//! In-memory session backend for the FAQ chatbot.
//!
//! Sessions live only as long as the process, or until they are closed or
//! purged for inactivity.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
