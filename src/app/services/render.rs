use crate::app::domain::token::{Token, TokenKind};
use crate::app::services::escape::push_escaped;

/// Render a token stream as an HTML fragment.
///
/// Every token is escaped; non-plain tokens are wrapped in
/// `<span class="{prefix}{suffix}">`. Consecutive tokens of one kind share a
/// span. Tokens are consumed once, in order.
pub fn render<'t, I>(tokens: I, class_prefix: &str) -> String
where
    I: IntoIterator<Item = Token<'t>>,
{
    let mut out = String::new();
    let mut open: Option<TokenKind> = None;

    for token in tokens {
        if token.text.is_empty() {
            continue;
        }
        if open != Some(token.kind) {
            if open.is_some_and(|kind| !kind.is_plain()) {
                out.push_str("</span>");
            }
            if !token.kind.is_plain() {
                out.push_str("<span class=\"");
                out.push_str(class_prefix);
                out.push_str(token.kind.css_suffix());
                out.push_str("\">");
            }
            open = Some(token.kind);
        }
        push_escaped(&mut out, token.text);
    }

    if open.is_some_and(|kind| !kind.is_plain()) {
        out.push_str("</span>");
    }
    out
}
