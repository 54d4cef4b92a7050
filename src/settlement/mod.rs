pub mod engine;
pub mod summary;
