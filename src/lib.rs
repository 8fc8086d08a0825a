pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;
pub mod research;
pub mod search;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use server::{router, serve};
