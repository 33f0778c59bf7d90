pub mod existing;
pub mod json;

pub use existing::Existing;
pub use json::JsonObject;
