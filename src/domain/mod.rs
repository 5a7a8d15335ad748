pub mod country;
pub mod lookup;
