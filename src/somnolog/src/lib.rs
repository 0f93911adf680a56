#[macro_use]
extern crate log;

mod baseline;
pub use baseline::BaselineChoice;

mod config;
pub use config::load_config;

pub mod demo;

mod report;
pub use report::{AnalysisResponse, ErrorResponse};

pub mod sensors;

mod window;
pub use window::ReadingWindow;
