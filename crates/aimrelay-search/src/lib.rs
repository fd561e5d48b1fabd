//! Web search and conversation augmentation for aimrelay
//!
//! Searches are restricted to an allow-list of trusted sites and the top hits
//! are injected as a system message ahead of the user's latest question.

pub mod augment;
pub mod client;
pub mod error;
pub mod settings;

pub use augment::{augment, enhanced_query, render_context, search_query, ContextAugmenter};
pub use client::{GoogleSearchClient, WebSearch};
pub use error::SearchError;
pub use settings::{SearchSettings, DEFAULT_TRUSTED_SITES, GOOGLE_SEARCH_URL};
