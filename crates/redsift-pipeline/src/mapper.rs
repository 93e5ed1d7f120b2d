//! Field mapping from source posts onto the exported record schema.

use chrono::{DateTime, Local, NaiveDateTime};
use redsift_core::FieldName;
use redsift_reddit::{Attribute, ExternalPost};

use crate::error::PipelineError;
use crate::record::{Cell, Record};

/// Converts epoch seconds to a naive local timestamp.
///
/// Fractional seconds are truncated. Returns `None` for values chrono cannot
/// represent.
#[must_use]
pub fn epoch_to_local(epoch: f64) -> Option<NaiveDateTime> {
    if !epoch.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let secs = epoch.trunc() as i64;
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local).naive_local())
}

/// Copies each allow-listed attribute the post exposes into a record.
///
/// Attributes the post lacks are skipped, leaving a gap. The creation time is
/// exported as `created_at`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidArgument`] if `fields` is empty.
pub fn map_post(post: &ExternalPost, fields: &[FieldName]) -> Result<Record, PipelineError> {
    if fields.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "field allow-list must not be empty".to_string(),
        ));
    }

    let mut record = Record::new();
    for &field in fields {
        if !post.has_field(field) {
            continue;
        }
        let cell = match post.attribute(field) {
            Some(Attribute::Text(s)) => Cell::Text(s),
            Some(Attribute::Integer(v)) => Cell::Integer(v),
            Some(Attribute::Float(v)) => Cell::Float(v),
            Some(Attribute::Bool(v)) => Cell::Bool(v),
            Some(Attribute::EpochSeconds(epoch)) => match epoch_to_local(epoch) {
                Some(ts) => Cell::Timestamp(ts),
                None => {
                    tracing::warn!(post_id = %post.id, epoch, "creation time out of range; omitted");
                    continue;
                }
            },
            None => continue,
        };
        record.insert(field.column(), cell);
    }
    Ok(record)
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
