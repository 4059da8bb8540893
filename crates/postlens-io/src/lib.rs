//! Archive loading, exports and config discovery

mod archive;
mod config;
mod export;
mod io;

pub use archive::{load_archive, parse_archive};
pub use config::{default_config_path, load_config, resolve_config_path, CONFIG_ENV};
pub use export::{
    buckets_csv, features_csv, read_features_csv, write_buckets_csv, write_features_csv,
    BucketRow,
};
pub use io::{atomic_write, to_jsonl, write_json_pretty, write_jsonl};
