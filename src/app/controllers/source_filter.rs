use std::io::Write;

use tracing::{debug, error};

use crate::app::domain::document::SourceDocument;
use crate::app::domain::settings::FilterSettings;
use crate::app::infrastructure::error::Result;
use crate::app::services::assemble::assemble;
use crate::app::services::render::render;
use crate::app::services::syntax::{FallbackReason, LexicalProvider, Resolved, ResolvedBy, resolve};
use crate::app::services::theme::{Stylesheets, ThemeName};

/// Rendered page snippet plus how its tokenizer was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub html: String,
    pub grammar: String,
    pub by: ResolvedBy,
}

/// Highlight one document. Never fails: every problem degrades to plain
/// text or an empty stylesheet.
pub fn highlight<P>(doc: &SourceDocument, settings: &FilterSettings, provider: &P, stylesheets: &Stylesheets) -> Highlighted
where
    P: LexicalProvider + ?Sized,
{
    let resolved = if settings.highlighting_enabled {
        resolve(provider, doc)
    } else {
        Resolved::fallback(FallbackReason::Disabled)
    };

    let fragment = render(resolved.tokenizer.tokenize(doc.content()), &settings.class_prefix);
    let dark = stylesheet_or_empty(stylesheets, ThemeName::Dark);
    let light = stylesheet_or_empty(stylesheets, ThemeName::Light);

    Highlighted {
        html: assemble(&dark, &light, &fragment),
        grammar: resolved.grammar().to_string(),
        by: resolved.by,
    }
}

fn stylesheet_or_empty(stylesheets: &Stylesheets, name: ThemeName) -> String {
    stylesheets.generate_css(name).unwrap_or_else(|e| {
        error!(theme = %name, error = %e, "Stylesheet unavailable, emitting empty rule set");
        String::new()
    })
}

/// Decode `input`, highlight it, and write the result to `out`.
///
/// Only writing the output can fail.
pub fn run<P, W>(
    filename: &str,
    input: &[u8],
    settings: &FilterSettings,
    provider: &P,
    stylesheets: &Stylesheets,
    out: &mut W,
) -> Result<ResolvedBy>
where
    P: LexicalProvider + ?Sized,
    W: Write,
{
    let doc = SourceDocument::from_bytes(filename, input);
    let highlighted = highlight(&doc, settings, provider, stylesheets);
    debug!(
        filename,
        grammar = %highlighted.grammar,
        by = ?highlighted.by,
        bytes = input.len(),
        "Highlighted document"
    );
    out.write_all(highlighted.html.as_bytes())?;
    out.flush()?;
    Ok(highlighted.by)
}
