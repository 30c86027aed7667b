pub mod config;
pub mod error;
pub mod http;
pub mod ids;
pub mod service;
pub mod storage;

pub use config::{Config, ConfigErr};
pub use error::{NOT_FOUND_MSG, ServiceErr};
pub use ids::ModelId;
pub use service::{Example, TextLab, Trained};
