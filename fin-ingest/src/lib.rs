//! fin-ingest: bank statement ingestion and row normalization.

pub mod normalizer;
pub mod parsers;
pub mod types;

pub use normalizer::normalize;
pub use parsers::statement_csv::{parse_statement_csv, parse_statement_reader};
pub use types::RawRecord;
