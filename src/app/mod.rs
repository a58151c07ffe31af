//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (SourceDocument, Token, Settings)
//! - `controllers/` - One request-handling function per filter
//! - `services/` - Lexer resolution, rendering, stylesheets, output assembly, avatars
//! - `infrastructure/` - Error types, logging, repository environment

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use domain::{FilterSettings, SourceDocument, SyntaxTheme, Token, TokenKind};
pub use infrastructure::error::{FilterError, Result};
pub use infrastructure::repo_env::RepoContext;
pub use services::syntax::SyntaxRegistry;
pub use services::theme::ThemeName;
