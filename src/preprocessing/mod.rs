//! Data transformation: turn raw mixed-type student records into a
//! fixed-width numeric feature matrix.
//!
//! Numeric columns get missing-value imputation and scaling; categorical
//! columns get imputation, one-hot encoding, and scaling without centering.
//! Every parameter is estimated from the training split only and reapplied
//! verbatim everywhere else.

mod config;
mod encoder;
mod imputer;
mod pipeline;
mod scaler;
mod transformation;

pub use config::PreprocessConfig;
pub use encoder::OneHotEncoder;
pub use imputer::{FillValue, Imputer, ImputeStrategy};
pub use pipeline::DataPreprocessor;
pub use scaler::{Scaler, ScalerType};
pub use transformation::{DataTransformation, TransformedData};
