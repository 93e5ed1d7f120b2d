//! Vocabulary shared by the source adapter, the pipeline, and configuration:
//! listing sort orders and the post fields that can be selected for export.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Order in which a topic's posts are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Hot,
    Top,
    New,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::Top => "top",
            SortOrder::New => "new",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(SortOrder::Hot),
            "top" => Ok(SortOrder::Top),
            "new" => Ok(SortOrder::New),
            _ => Err(CoreError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// A post attribute that may be copied into an exported record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Title,
    Body,
    Score,
    ExternalId,
    Url,
    Permalink,
    CommentCount,
    /// Epoch-seconds creation time. Exported as `created_at`.
    CreatedUtc,
    Author,
    UpvoteRatio,
    Over18,
}

/// Allow-list used when none is configured.
pub const DEFAULT_FIELDS: [FieldName; 8] = [
    FieldName::Title,
    FieldName::Body,
    FieldName::Score,
    FieldName::CommentCount,
    FieldName::CreatedUtc,
    FieldName::Permalink,
    FieldName::Url,
    FieldName::Author,
];

impl FieldName {
    /// Canonical attribute name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Body => "body",
            FieldName::Score => "score",
            FieldName::ExternalId => "external_id",
            FieldName::Url => "url",
            FieldName::Permalink => "permalink",
            FieldName::CommentCount => "comment_count",
            FieldName::CreatedUtc => "created_utc",
            FieldName::Author => "author",
            FieldName::UpvoteRatio => "upvote_ratio",
            FieldName::Over18 => "over_18",
        }
    }

    /// Column name the field is exported under.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            FieldName::CreatedUtc => "created_at",
            other => other.as_str(),
        }
    }

    /// Parses a comma-separated allow-list, preserving order and dropping repeats.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] for the first unrecognised name.
    pub fn parse_list(raw: &str) -> Result<Vec<FieldName>, CoreError> {
        let mut fields = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let field = name.parse::<FieldName>()?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(fields)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "title" => FieldName::Title,
            "body" | "selftext" | "self_text" => FieldName::Body,
            "score" => FieldName::Score,
            "external_id" | "id" => FieldName::ExternalId,
            "url" => FieldName::Url,
            "permalink" => FieldName::Permalink,
            "comment_count" | "num_comments" => FieldName::CommentCount,
            "created_utc" | "created_time" => FieldName::CreatedUtc,
            "author" => FieldName::Author,
            "upvote_ratio" => FieldName::UpvoteRatio,
            "over_18" => FieldName::Over18,
            _ => return Err(CoreError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_parses_case_insensitively() {
        assert_eq!("HOT".parse::<SortOrder>().unwrap(), SortOrder::Hot);
        assert_eq!(" top ".parse::<SortOrder>().unwrap(), SortOrder::Top);
        assert_eq!("new".parse::<SortOrder>().unwrap(), SortOrder::New);
    }

    #[test]
    fn sort_order_rejects_unknown_value() {
        let err = "rising".parse::<SortOrder>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSortOrder(ref v) if v == "rising"));
    }

    #[test]
    fn field_aliases_resolve_to_canonical_names() {
        assert_eq!("self_text".parse::<FieldName>().unwrap(), FieldName::Body);
        assert_eq!("selftext".parse::<FieldName>().unwrap(), FieldName::Body);
        assert_eq!(
            "num_comments".parse::<FieldName>().unwrap(),
            FieldName::CommentCount
        );
        assert_eq!("id".parse::<FieldName>().unwrap(), FieldName::ExternalId);
    }

    #[test]
    fn created_utc_exports_as_created_at() {
        assert_eq!(FieldName::CreatedUtc.column(), "created_at");
        assert_eq!(FieldName::Title.column(), "title");
    }

    #[test]
    fn parse_list_keeps_order_and_drops_repeats() {
        let fields = FieldName::parse_list("score, title,selftext,body,,score").unwrap();
        assert_eq!(
            fields,
            vec![FieldName::Score, FieldName::Title, FieldName::Body]
        );
    }

    #[test]
    fn parse_list_reports_unknown_field() {
        let err = FieldName::parse_list("title,flair").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(ref v) if v == "flair"));
    }
}
