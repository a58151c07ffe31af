use std::io::Write;

use tracing::debug;

use crate::app::domain::settings::FilterSettings;
use crate::app::infrastructure::error::Result;
use crate::app::services::avatar::annotate;

/// Prefix the text read from `input` with the avatar for `email`.
///
/// `page` is the cgit page the address appears on; it does not affect the
/// output.
pub fn run<W: Write>(email: &str, page: Option<&str>, input: &[u8], settings: &FilterSettings, out: &mut W) -> Result<()> {
    let text = String::from_utf8_lossy(input);
    debug!(page = page.unwrap_or("-"), "Annotating email");
    let line = annotate(email, &text, &settings.avatar_base_url, settings.avatar_size);
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}
