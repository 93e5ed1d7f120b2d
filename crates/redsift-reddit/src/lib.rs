//! Reddit source adapter.
//!
//! Exposes the two capabilities the pipeline needs from the content platform,
//! topic (subreddit) search and per-topic post listing, behind the
//! [`SourceClient`] trait. [`RedditClient`] talks to the Reddit OAuth API;
//! [`BlockingClient`] adapts any `SourceClient` for synchronous callers.

pub mod blocking;
pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use blocking::BlockingClient;
pub use client::RedditClient;
pub use error::SourceError;
pub use source::SourceClient;
pub use types::{Attribute, ExternalPost, Topic};
