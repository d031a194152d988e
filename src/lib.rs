pub mod aggregate;
pub mod config;
pub mod emerging;
pub mod error;
pub mod industry;
pub mod occupation;
pub mod output;
pub mod scoring;
pub mod sources;
