use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::debug;

use super::tokenizer::{GrammarTokenizer, PLAIN_TEXT, PlainText, Tokenizer};
use crate::app::infrastructure::error::Result;

/// Outcome of a filename-based grammar guess.
pub enum Guess<'p> {
    Recognized(Box<dyn Tokenizer + 'p>),
    /// No grammar is registered for this filename.
    NotRecognized,
    /// Several grammars claim the filename and the content contradicts them.
    Ambiguous { candidates: Vec<String> },
}

impl fmt::Debug for Guess<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recognized(tokenizer) => f.debug_tuple("Recognized").field(&tokenizer.grammar()).finish(),
            Self::NotRecognized => f.write_str("NotRecognized"),
            Self::Ambiguous { candidates } => f.debug_struct("Ambiguous").field("candidates", candidates).finish(),
        }
    }
}

/// Source of grammar-specific tokenizers.
///
/// `Err` means the provider itself misbehaved, which is different from
/// simply not knowing the file type.
pub trait LexicalProvider {
    fn guess_by_filename_and_content(&self, filename: &str, content: &str) -> Result<Guess<'_>>;

    /// Guess from content alone (shebang lines, modelines, XML prologs).
    fn guess_by_content(&self, content: &str) -> Result<Option<Box<dyn Tokenizer + '_>>>;
}

/// Grammar registry backed by syntect's bundled syntax definitions.
pub struct SyntaxRegistry {
    syntax_set: SyntaxSet,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        Self::with_syntax_set(SyntaxSet::load_defaults_newlines())
    }

    /// Grammars must be compiled for lines that keep their `\n`.
    pub fn with_syntax_set(syntax_set: SyntaxSet) -> Self {
        Self { syntax_set }
    }

    /// Look a grammar up by name. Unknown names get the plain-text tokenizer.
    pub fn tokenizer(&self, grammar: &str) -> Box<dyn Tokenizer + '_> {
        match self.syntax_set.find_syntax_by_name(grammar) {
            Some(syntax) if syntax.name != PLAIN_TEXT => self.grammar_tokenizer(syntax),
            _ => Box::new(PlainText),
        }
    }

    fn grammar_tokenizer<'a>(&'a self, syntax: &'a SyntaxReference) -> Box<dyn Tokenizer + 'a> {
        Box::new(GrammarTokenizer::new(syntax, &self.syntax_set))
    }

    /// Grammars claiming the file's base name or extension, exact base-name
    /// matches first.
    fn candidates(&self, base: &str, ext: Option<&str>) -> Vec<&SyntaxReference> {
        let mut seen = HashSet::new();
        let mut found: Vec<&SyntaxReference> = self
            .syntax_set
            .syntaxes()
            .iter()
            .filter(|s| s.name != PLAIN_TEXT)
            .filter(|s| claims(s, base) || ext.is_some_and(|ext| claims(s, ext)))
            .filter(|s| seen.insert(s.name.as_str()))
            .collect();
        found.sort_by_key(|s| !claims(s, base));
        found
    }

    /// Pick among several claimants when the content gives no hint.
    ///
    /// A base-name claim wins outright. Otherwise the grammar listing the
    /// extension earliest among its own extensions is taken, so `.h` goes to
    /// C (`c, h`) rather than C++ or Objective-C. Ties keep load order.
    fn preferred<'a>(base: &str, ext: Option<&str>, candidates: &[&'a SyntaxReference]) -> Option<&'a SyntaxReference> {
        let first = candidates.first().copied()?;
        if claims(first, base) {
            return Some(first);
        }
        let rank = |s: &SyntaxReference| {
            ext.and_then(|ext| s.file_extensions.iter().position(|p| p.eq_ignore_ascii_case(ext)))
                .unwrap_or(usize::MAX)
        };
        candidates.iter().copied().min_by_key(|s| rank(s))
    }

    fn first_line_match(&self, content: &str) -> Option<&SyntaxReference> {
        let first_line = content.lines().next().unwrap_or("");
        self.syntax_set
            .find_syntax_by_first_line(first_line)
            .filter(|s| s.name != PLAIN_TEXT)
    }
}

/// Base name and extension of `filename`; `None` when it has no base name.
fn file_name_parts(filename: &str) -> Option<(&str, Option<&str>)> {
    let path = Path::new(filename);
    let base = path.file_name().and_then(|n| n.to_str()).filter(|b| !b.is_empty())?;
    Some((base, path.extension().and_then(|e| e.to_str())))
}

fn claims(syntax: &SyntaxReference, name: &str) -> bool {
    syntax.file_extensions.iter().any(|p| p.eq_ignore_ascii_case(name))
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalProvider for SyntaxRegistry {
    fn guess_by_filename_and_content(&self, filename: &str, content: &str) -> Result<Guess<'_>> {
        let Some((base, ext)) = file_name_parts(filename) else {
            return Ok(Guess::NotRecognized);
        };
        let candidates = self.candidates(base, ext);
        let guess = match candidates.as_slice() {
            [] => Guess::NotRecognized,
            [only] => Guess::Recognized(self.grammar_tokenizer(*only)),
            several => match self.first_line_match(content) {
                Some(hint) if several.iter().any(|c| c.name == hint.name) => {
                    Guess::Recognized(self.grammar_tokenizer(hint))
                }
                Some(hint) => {
                    debug!(filename, first_line = %hint.name, "Content contradicts filename grammars");
                    Guess::Ambiguous {
                        candidates: several.iter().map(|s| s.name.clone()).collect(),
                    }
                }
                None => match Self::preferred(base, ext, several) {
                    Some(syntax) => Guess::Recognized(self.grammar_tokenizer(syntax)),
                    None => Guess::NotRecognized,
                },
            },
        };
        Ok(guess)
    }

    fn guess_by_content(&self, content: &str) -> Result<Option<Box<dyn Tokenizer + '_>>> {
        Ok(self.first_line_match(content).map(|syntax| self.grammar_tokenizer(syntax)))
    }
}
