pub mod country_details;
pub mod schema;

pub use country_details::country_details_extensions;
pub use schema::{ContentType, SchemaExtensions};
