pub mod cache;
pub mod reference_api;
