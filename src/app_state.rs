use crate::pipeline::RatingPipeline;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RatingPipeline>,
}

impl AppState {
    pub fn new(pipeline: RatingPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
