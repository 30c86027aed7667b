mod linear_svc;
mod model;

pub use linear_svc::{LinearSvc, LinearSvcParams};
pub use model::Classifier;
