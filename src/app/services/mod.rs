//! Services layer - the highlighting pipeline and the avatar filter.
//!
//! - Lexer resolution and tokenizers (syntect-backed)
//! - Token rendering to HTML
//! - Theme stylesheets
//! - Dual-theme output assembly
//! - Avatar markup

pub mod assemble;
pub mod avatar;
pub mod escape;
pub mod render;
pub mod syntax;
pub mod theme;
