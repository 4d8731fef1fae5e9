pub mod analysis;
pub mod ast;
pub mod config;
pub mod doc;
pub mod error;
pub mod extract;
pub mod http;
pub mod lexer;
pub mod llm;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod semantic;
pub mod source;
pub mod token; // JS/TS tokens
pub mod visitor;

// Export common types to avoid import conflicts
pub use ast::{ASTNode, Callee, Function, Parameter};
pub use error::{DocError, Result};

// Re-export visitor trait
pub use visitor::{Visitable, Visitor};

mod prelude;
pub use prelude::*;

/// Installs the `env_logger` backend with an `info` default; `RUST_LOG`
/// overrides it.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
