pub mod sheet_parser;
pub mod snapshot_cache;
