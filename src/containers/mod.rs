pub mod models;
pub mod serialization;
