pub mod ast;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod settings;
pub mod utils;

pub use ast::{Document, Value};
pub use config::{Config, Options, Source};
pub use error::KonfigError;
pub use settings::SettingsMap;
