//! passbook-ingest: statement decoding, the institution grammars, and the per-institution pipeline.

pub mod parsers;
pub mod pipeline;
pub mod reader;
pub mod registry;
pub mod types;

pub use parsers::{Grammar, StatementParser};
pub use pipeline::{ingest_source, SourceBatch, SourceStats};
pub use reader::{discover_files, FsSourceReader, SourceReader};
pub use registry::{ParserRegistry, SourceSpec};
pub use types::{Layout, SourceContent, SourceDocument, StatementKind};
