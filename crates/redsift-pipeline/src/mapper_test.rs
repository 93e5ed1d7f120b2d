use chrono::{DateTime, Local};
use redsift_core::{FieldName, DEFAULT_FIELDS};
use redsift_reddit::ExternalPost;

use super::*;

fn post() -> ExternalPost {
    ExternalPost {
        title: "Test Post".to_string(),
        score: 10,
        id: "test_id".to_string(),
        url: "http://example.com".to_string(),
        num_comments: 5,
        created_utc: 1_616_582_223.0,
        selftext: Some("This is a test post".to_string()),
        author: None,
        permalink: Some("/r/testsub/comments/test_id/test_post/".to_string()),
        upvote_ratio: Some(0.95),
        over_18: Some(false),
    }
}

fn expected_created_at() -> NaiveDateTime {
    DateTime::from_timestamp(1_616_582_223, 0)
        .expect("valid epoch")
        .with_timezone(&Local)
        .naive_local()
}

#[test]
fn maps_exposed_fields_in_allow_list_order() {
    let record = map_post(&post(), &DEFAULT_FIELDS).expect("map");
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(
        keys,
        vec![
            "title",
            "body",
            "score",
            "comment_count",
            "created_at",
            "permalink",
            "url"
        ]
    );
    assert_eq!(record.get("title"), Some(&Cell::Text("Test Post".into())));
    assert_eq!(record.get("comment_count"), Some(&Cell::Integer(5)));
}

#[test]
fn missing_optional_field_is_a_gap_not_a_placeholder() {
    let record = map_post(&post(), &[FieldName::Title, FieldName::Author]).expect("map");
    assert!(!record.contains_key("author"));
    assert_eq!(record.len(), 1);
}

#[test]
fn creation_time_is_renamed_and_converted() {
    let record = map_post(&post(), &[FieldName::CreatedUtc]).expect("map");
    assert!(!record.contains_key("created_utc"));
    assert_eq!(
        record.get("created_at"),
        Some(&Cell::Timestamp(expected_created_at()))
    );
}

#[test]
fn fractional_epoch_is_truncated() {
    assert_eq!(epoch_to_local(1_616_582_223.9), Some(expected_created_at()));
}

#[test]
fn non_finite_epoch_has_no_timestamp() {
    assert_eq!(epoch_to_local(f64::NAN), None);
    assert_eq!(epoch_to_local(f64::INFINITY), None);
}

#[test]
fn supplemental_fields_keep_their_types() {
    let record = map_post(&post(), &[FieldName::UpvoteRatio, FieldName::Over18]).expect("map");
    assert_eq!(record.get("upvote_ratio"), Some(&Cell::Float(0.95)));
    assert_eq!(record.get("over_18"), Some(&Cell::Bool(false)));
}

#[test]
fn empty_allow_list_is_rejected() {
    let err = map_post(&post(), &[]).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidArgument(_)));
}
