pub mod arch;
pub mod dataset;
pub mod error;
pub mod optimization;
pub mod pipeline;
pub mod text;

pub use arch::LinearSvcParams;
pub use error::{MlErr, Result};
pub use pipeline::TextClassifier;
