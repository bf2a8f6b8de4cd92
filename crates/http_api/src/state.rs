//! Shared handler state

use std::sync::Arc;

use contracts::RoutingTable;
use dispatcher::Pipeline;

/// State shared by all handlers: the immutable routing table and the pipeline
pub struct AppState<W> {
    pub routes: Arc<RoutingTable>,
    pub pipeline: Pipeline<W>,
}

impl<W> AppState<W> {
    pub fn new(routes: Arc<RoutingTable>, pipeline: Pipeline<W>) -> Self {
        Self { routes, pipeline }
    }
}

impl<W> Clone for AppState<W> {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            pipeline: self.pipeline.clone(),
        }
    }
}
