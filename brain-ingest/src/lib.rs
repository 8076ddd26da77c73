//! Capture ingestion: folder routing and the validate → route → persist flow.

pub mod ingest;
pub mod routing;

pub use ingest::{ingest, ingest_with_router, IngestOutcome, IngestRequest};
pub use routing::{route, FolderRouter, HeuristicRouter, HEURISTIC_VERSION};
