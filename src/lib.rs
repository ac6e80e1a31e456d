pub mod cli;
pub mod config;
pub mod constants;
pub mod ff;
pub mod input;
pub mod sync;
