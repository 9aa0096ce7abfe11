//! Model artifact loading and prediction dispatch

pub mod dispatcher;
pub mod loader;

pub use dispatcher::{Dispatcher, Prediction};
pub use loader::ModelLoader;
