//! Render surface: where finished pages are published.
//!
//! The surface owns one indexed container per page. The orchestrator asks it for a page count,
//! then clears and repopulates each container in order. `settle` is the suspension point used
//! to let pending render work commit before measuring or publishing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::Node;

#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Waits for any pending render commit.
    async fn settle(&self);

    /// Makes exactly `page_count` containers available, indexed from 0.
    async fn prepare(&self, page_count: usize);

    /// Clears container `index` and fills it with `nodes`. Returns false when the container
    /// does not exist.
    async fn replace(&self, index: usize, nodes: Vec<Node>) -> bool;
}

/// In-process surface backing the HTTP handler and tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    containers: Mutex<Vec<Vec<Node>>>,
}

impl MemorySurface {
    pub fn new() -> MemorySurface {
        MemorySurface::default()
    }

    /// Current contents of every container.
    pub fn snapshot(&self) -> Vec<Vec<Node>> {
        self.containers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl RenderSurface for MemorySurface {
    async fn settle(&self) {
        tokio::task::yield_now().await;
    }

    async fn prepare(&self, page_count: usize) {
        let mut containers = self
            .containers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        containers.resize_with(page_count, Vec::new);
    }

    async fn replace(&self, index: usize, nodes: Vec<Node>) -> bool {
        let mut containers = self
            .containers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match containers.get_mut(index) {
            Some(container) => {
                *container = nodes;
                true
            }
            None => false,
        }
    }
}
