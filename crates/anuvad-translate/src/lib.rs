//! # anuvad-translate
//!
//! The translation gateway consumed by the relay's session handler.
//!
//! - **Trait**: [`Translator`], shared across sessions as [`SharedTranslator`]
//! - **Errors**: [`TranslationError`], one variant per provider failure class
//! - **Google**: [`GoogleTranslator`] against the public `translate_a/single` endpoint
//! - **Timeout**: [`TimeoutTranslator`] bounds any translator's call duration
//!
//! No retries happen at this layer. A failure surfaces to the caller
//! immediately.
//!
//! ## Crate Position
//!
//! Leaf crate. Depended on by: anuvad-server, anuvad-agent.

#![deny(unsafe_code)]

pub mod errors;
pub mod google;
pub mod timeout;
pub mod translator;

pub use errors::{Result, TranslationError};
pub use google::{GoogleConfig, GoogleTranslator};
pub use timeout::TimeoutTranslator;
pub use translator::{SharedTranslator, Translator};
