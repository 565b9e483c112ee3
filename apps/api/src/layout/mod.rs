// Pagination engine: height oracle, greedy packer, buffer search, compression, publication.
// The packing pipeline is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod atoms;
pub mod box_model;
pub mod classify;
pub mod compressor;
pub mod oracle;
pub mod orchestrator;
pub mod page_config;
pub mod paginator;
pub mod scoring;
pub mod search;
pub mod surface;
pub mod target;
pub mod text_metrics;

#[cfg(test)]
mod testing;

// Re-export the public API consumed by the HTTP layer.
pub use box_model::BoxModelEngine;
pub use classify::TagSets;
pub use orchestrator::{Orchestrator, PaginationOutcome};
pub use page_config::{default_pagination_config, PaginationConfig};
pub use surface::MemorySurface;
pub use text_metrics::FontFamily;
