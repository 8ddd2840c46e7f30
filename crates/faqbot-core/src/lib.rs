//! Core types for the FAQ chatbot: the FAQ set, chat transcript, TF-IDF
//! matcher and the session object that ties them together.
//!
//! This crate is free of HTTP and async runtime dependencies. The
//! [`store::SessionStore`] trait is implemented by storage backends (e.g.
//! `faqbot-store-memory`) and consumed by `faqbot-api`.

// Native `async fn` in traits; the returned futures are declared `Send`
// explicitly in `store`.
#![allow(async_fn_in_trait)]

pub mod cache;
pub mod chat;
pub mod error;
pub mod faq;
pub mod matcher;
pub mod session;
pub mod store;
pub mod template;

mod stop_words;

pub use error::{Error, Result};
