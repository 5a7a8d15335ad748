pub mod cache;
pub mod countriesnow;
