pub mod catalog;
pub mod client;
pub mod log;
pub mod upload;
