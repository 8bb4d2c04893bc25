//! Activity logging: typed session events appended to a JSONL file with
//! rotation and graceful degradation.

pub mod activity;
pub mod jsonl;
