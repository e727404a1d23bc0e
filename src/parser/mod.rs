pub mod common;
mod js;

pub use js::JsParser;
