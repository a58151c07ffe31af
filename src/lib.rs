//! cgit filters: a syntax-highlighting `source-filter` and a Gravatar
//! `email-filter`, each driven by a thin binary over stdin/stdout.

pub mod app;

pub use app::{
    FilterError, FilterSettings, RepoContext, Result, SourceDocument, SyntaxRegistry, SyntaxTheme,
    ThemeName, Token, TokenKind,
};
