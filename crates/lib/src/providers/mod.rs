pub mod ai;
pub mod store;
pub mod upload;
