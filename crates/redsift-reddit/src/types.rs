//! Wire types for Reddit listings and the attribute view used by field mapping.

use redsift_core::FieldName;
use serde::Deserialize;

/// Reddit listing envelope (`{"kind": "Listing", "data": {...}}`).
#[derive(Debug, Deserialize)]
pub(crate) struct Listing<T> {
    pub(crate) data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData<T> {
    pub(crate) children: Vec<Thing<T>>,
    pub(crate) after: Option<String>,
}

/// A single listing child (`{"kind": "t3", "data": {...}}`).
#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
    pub(crate) data: T,
}

/// A community returned by topic search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Topic {
    pub display_name: String,
}

impl Topic {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

/// A post as returned by a topic listing.
///
/// Required attributes are plain fields; attributes Reddit omits for some
/// posts are `Option`s and surface as absent through [`ExternalPost::attribute`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalPost {
    pub title: String,
    pub score: i64,
    pub id: String,
    pub url: String,
    pub num_comments: i64,
    pub created_utc: f64,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub upvote_ratio: Option<f64>,
    #[serde(default)]
    pub over_18: Option<bool>,
}

/// Typed value of one post attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Seconds since the Unix epoch.
    EpochSeconds(f64),
}

impl ExternalPost {
    /// Whether this post exposes `name`.
    #[must_use]
    pub fn has_field(&self, name: FieldName) -> bool {
        match name {
            FieldName::Title
            | FieldName::Score
            | FieldName::ExternalId
            | FieldName::Url
            | FieldName::CommentCount
            | FieldName::CreatedUtc => true,
            FieldName::Body => self.selftext.is_some(),
            FieldName::Author => self.author.is_some(),
            FieldName::Permalink => self.permalink.is_some(),
            FieldName::UpvoteRatio => self.upvote_ratio.is_some(),
            FieldName::Over18 => self.over_18.is_some(),
        }
    }

    /// The value of `name`, or `None` when the post does not expose it.
    #[must_use]
    pub fn attribute(&self, name: FieldName) -> Option<Attribute> {
        let value = match name {
            FieldName::Title => Attribute::Text(self.title.clone()),
            FieldName::Body => Attribute::Text(self.selftext.clone()?),
            FieldName::Score => Attribute::Integer(self.score),
            FieldName::ExternalId => Attribute::Text(self.id.clone()),
            FieldName::Url => Attribute::Text(self.url.clone()),
            FieldName::Permalink => Attribute::Text(self.permalink.clone()?),
            FieldName::CommentCount => Attribute::Integer(self.num_comments),
            FieldName::CreatedUtc => Attribute::EpochSeconds(self.created_utc),
            FieldName::Author => Attribute::Text(self.author.clone()?),
            FieldName::UpvoteRatio => Attribute::Float(self.upvote_ratio?),
            FieldName::Over18 => Attribute::Bool(self.over_18?),
        };
        Some(value)
    }
}
