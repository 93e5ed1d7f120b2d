//! Fetch, clean, and shuffle pipeline for Reddit posts.
//!
//! Posts matching a search term are fetched topic by topic, mapped onto the
//! configured field allow-list, and written through three stage files:
//! raw, cleaned (lowercased columns, normalized text), and shuffled.

pub mod driver;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod normalize;
pub mod record;
pub mod shuffle;
pub mod table;

pub use driver::{
    run_pipeline, run_pipeline_blocking, PipelineFailure, PipelineReport, PipelineState,
    StageObserver,
};
pub use error::PipelineError;
pub use fetch::{fetch_posts, fetch_posts_blocking, SOURCE_GROUP_COLUMN};
pub use mapper::{epoch_to_local, map_post};
pub use normalize::{normalize, normalize_text};
pub use record::{Cell, Record, TIMESTAMP_FORMAT};
pub use shuffle::{shuffle_file, shuffle_rows};
pub use table::{map_columns, save_records, Table};
