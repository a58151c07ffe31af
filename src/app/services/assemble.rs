const DARK_QUERY: &str = "@media (prefers-color-scheme: dark) {\n";
const LIGHT_QUERY: &str = "@media (prefers-color-scheme: light) {\n";

/// Join both stylesheets and the rendered fragment into the final page
/// snippet: one `<style>` block, dark rules first, then the fragment as is.
///
/// Each media block is emitted even when its rule set is empty.
pub fn assemble(dark_css: &str, light_css: &str, fragment: &str) -> String {
    let mut out = String::with_capacity(dark_css.len() + light_css.len() + fragment.len() + 128);
    out.push_str("<style>\n");
    push_media_block(&mut out, DARK_QUERY, dark_css);
    push_media_block(&mut out, LIGHT_QUERY, light_css);
    out.push_str("</style>\n");
    out.push_str(fragment);
    out
}

fn push_media_block(out: &mut String, query: &str, css: &str) {
    out.push_str(query);
    out.push_str(css);
    if !css.is_empty() && !css.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("}\n");
}
