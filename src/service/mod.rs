pub mod lookup;
pub mod response;

pub use lookup::LookupService;
pub use response::{ServiceResponse, country_search_response};
