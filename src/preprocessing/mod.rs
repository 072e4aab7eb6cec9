//! Feature preprocessing
//!
//! Maps raw feature records to a fixed-length numeric design vector:
//! one-hot encoding for categorical fields, standardization for numeric
//! fields. Learned state is fixed at training time and serialized inside
//! the model artifact so inference reproduces the exact same columns.

mod encoder;
mod pipeline;
mod scaler;

pub use encoder::OneHotEncoder;
pub use pipeline::FeaturePipeline;
pub use scaler::StandardScaler;
