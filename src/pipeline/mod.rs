//! End-to-end pipelines: training (ingest → transform → train) and
//! prediction (load artifacts → transform one row → predict).

mod predict;
mod train;

pub use predict::{PredictPipeline, StudentRecord};
pub use train::TrainPipeline;
