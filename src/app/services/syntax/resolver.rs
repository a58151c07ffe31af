use tracing::{debug, warn};

use super::provider::{Guess, LexicalProvider};
use super::tokenizer::{PlainText, Tokenizer};
use crate::app::domain::document::SourceDocument;

/// Why the plain-text tokenizer was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No grammar for the filename and no interpreter marker.
    NotRecognized,
    /// Interpreter marker present, but no grammar matched it.
    NoShebangMatch,
    Ambiguous,
    ProviderFault,
    /// Highlighting switched off in the settings.
    Disabled,
}

/// Which step of the resolution produced the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    Filename,
    Shebang,
    Fallback(FallbackReason),
}

pub struct Resolved<'p> {
    pub tokenizer: Box<dyn Tokenizer + 'p>,
    pub by: ResolvedBy,
}

impl<'p> Resolved<'p> {
    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            tokenizer: Box::new(PlainText),
            by: ResolvedBy::Fallback(reason),
        }
    }

    pub fn grammar(&self) -> &str {
        self.tokenizer.grammar()
    }
}

/// Select a tokenizer for `doc`. Always succeeds.
///
/// Filename (with content disambiguation) first; when the filename is
/// unknown and the content starts with `#!`, the content alone; otherwise
/// plain text. Ambiguity and provider faults go straight to plain text.
pub fn resolve<'p, P>(provider: &'p P, doc: &SourceDocument) -> Resolved<'p>
where
    P: LexicalProvider + ?Sized,
{
    let guess = match provider.guess_by_filename_and_content(doc.filename(), doc.content()) {
        Ok(guess) => guess,
        Err(e) => {
            warn!(filename = doc.filename(), error = %e, "Filename guess failed, using plain text");
            return Resolved::fallback(FallbackReason::ProviderFault);
        }
    };

    let resolved = match guess {
        Guess::Recognized(tokenizer) => Resolved {
            tokenizer,
            by: ResolvedBy::Filename,
        },
        Guess::Ambiguous { candidates } => {
            debug!(filename = doc.filename(), ?candidates, "Ambiguous grammar match");
            Resolved::fallback(FallbackReason::Ambiguous)
        }
        Guess::NotRecognized if doc.has_shebang() => match provider.guess_by_content(doc.content()) {
            Ok(Some(tokenizer)) => Resolved {
                tokenizer,
                by: ResolvedBy::Shebang,
            },
            Ok(None) => Resolved::fallback(FallbackReason::NoShebangMatch),
            Err(e) => {
                warn!(filename = doc.filename(), error = %e, "Content guess failed, using plain text");
                Resolved::fallback(FallbackReason::ProviderFault)
            }
        },
        Guess::NotRecognized => Resolved::fallback(FallbackReason::NotRecognized),
    };
    debug!(filename = doc.filename(), grammar = resolved.grammar(), by = ?resolved.by, "Resolved tokenizer");
    resolved
}
