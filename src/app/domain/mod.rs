//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - SourceDocument, the decoded file being filtered
//! - Token and TokenKind, the lexical categories shared by renderer and themes
//! - Filter settings

pub mod document;
pub mod settings;
pub mod token;

pub use document::SourceDocument;
pub use settings::{FilterSettings, SyntaxTheme};
pub use token::{Token, TokenKind};
