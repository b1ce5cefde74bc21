pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod render;
pub mod seed;
pub mod session;
pub mod store;
pub mod validation;
pub mod vocab;
