pub mod error;
pub mod gc;
pub mod logging;
pub mod model;
pub mod registry;

pub use error::{Error, Result};
