pub mod document;

pub use document::Node;
