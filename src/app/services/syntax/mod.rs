//! Lexer selection: tokenizers, the syntect-backed grammar registry, and
//! the fallback chain that always ends in plain text.

pub mod provider;
pub mod resolver;
pub mod tokenizer;

pub use provider::{Guess, LexicalProvider, SyntaxRegistry};
pub use resolver::{FallbackReason, Resolved, ResolvedBy, resolve};
pub use tokenizer::{GrammarTokenizer, PLAIN_TEXT, PlainText, Tokenizer, Tokens};
