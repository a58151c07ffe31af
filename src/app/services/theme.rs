use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use syntect::highlighting::{Color, FontStyle, Highlighter, Style, Theme, ThemeSet};
use syntect::parsing::Scope;
use tracing::debug;

use crate::app::domain::settings::{FilterSettings, SyntaxTheme};
use crate::app::domain::token::TokenKind;
use crate::app::infrastructure::error::{FilterError, Result};

/// The two built-in stylesheet slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(FilterError::UnknownTheme(other.to_string())),
        }
    }
}

/// Visual style of one token kind. The default value is a no-op style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenStyle {
    pub foreground: Option<(u8, u8, u8)>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TokenStyle {
    /// Keep only what differs from the theme's plain text.
    ///
    /// Backgrounds are dropped, so an entry whose foreground is the page
    /// background (base16 `invalid.illegal`) takes its own background as the
    /// text colour. A colour equal to either page colour is never emitted.
    fn from_syntect(style: Style, default: Style) -> Self {
        let colour = if style.foreground == default.background && style.background != default.background {
            style.background
        } else {
            style.foreground
        };
        Self {
            foreground: visible(colour, default).then_some((colour.r, colour.g, colour.b)),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// CSS declarations, without braces. Never sets a background.
    pub fn declarations(&self) -> String {
        let mut decls = Vec::new();
        if let Some((r, g, b)) = self.foreground {
            decls.push(format!("color: #{};", hex::encode([r, g, b])));
        }
        if self.bold {
            decls.push("font-weight: bold;".to_string());
        }
        if self.italic {
            decls.push("font-style: italic;".to_string());
        }
        if self.underline {
            decls.push("text-decoration: underline;".to_string());
        }
        decls.join(" ")
    }
}

fn visible(colour: Color, default: Style) -> bool {
    colour != default.foreground && colour != default.background
}

/// Scope looked up in a syntect theme to style each kind.
fn theme_scope(kind: TokenKind) -> Option<&'static str> {
    let scope = match kind {
        TokenKind::Plain => return None,
        TokenKind::Keyword => "keyword.control",
        TokenKind::KeywordType => "storage.type",
        TokenKind::Constant => "constant.language",
        TokenKind::Number => "constant.numeric",
        TokenKind::String => "string.quoted.double",
        TokenKind::Escape => "constant.character.escape",
        TokenKind::Regex => "string.regexp",
        TokenKind::Comment => "comment.line",
        TokenKind::Preprocessor => "meta.preprocessor",
        TokenKind::Operator => "keyword.operator",
        TokenKind::Punctuation => "punctuation.separator",
        TokenKind::Function => "entity.name.function",
        TokenKind::Type => "entity.name.type",
        TokenKind::Tag => "entity.name.tag",
        TokenKind::Attribute => "entity.other.attribute-name",
        TokenKind::Variable => "variable.other",
        TokenKind::Builtin => "support.function.builtin",
        TokenKind::Heading => "markup.heading",
        TokenKind::Emphasis => "markup.italic",
        TokenKind::Strong => "markup.bold",
        TokenKind::Inserted => "markup.inserted",
        TokenKind::Deleted => "markup.deleted",
        TokenKind::Error => "invalid.illegal",
    };
    Some(scope)
}

/// A named mapping from every token kind to its style.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDefinition {
    name: ThemeName,
    styles: BTreeMap<TokenKind, TokenStyle>,
}

impl ThemeDefinition {
    pub fn from_syntect(name: ThemeName, theme: &Theme) -> Self {
        let highlighter = Highlighter::new(theme);
        let default = highlighter.get_default();

        let styles = TokenKind::ALL
            .iter()
            .map(|&kind| {
                let style = theme_scope(kind)
                    .and_then(|s| Scope::new(s).ok())
                    .map(|scope| TokenStyle::from_syntect(highlighter.style_for_stack(&[scope]), default))
                    .unwrap_or_default();
                (kind, style)
            })
            .collect();

        Self { name, styles }
    }

    pub fn name(&self) -> ThemeName {
        self.name
    }

    pub fn style(&self, kind: TokenKind) -> TokenStyle {
        self.styles.get(&kind).copied().unwrap_or_default()
    }

    /// One rule per kind with a non-default style, in `TokenKind::ALL` order.
    pub fn to_css(&self, class_prefix: &str) -> String {
        let mut css = String::new();
        for kind in TokenKind::ALL {
            let style = self.style(kind);
            if kind.is_plain() || style.is_default() {
                continue;
            }
            css.push_str(&format!(".{}{} {{ {} }}\n", class_prefix, kind.css_suffix(), style.declarations()));
        }
        css
    }
}

/// Builds the CSS for the light and dark slots from the configured syntect
/// themes.
pub struct Stylesheets {
    theme_set: ThemeSet,
    light: SyntaxTheme,
    dark: SyntaxTheme,
    class_prefix: String,
}

impl Stylesheets {
    pub fn new(settings: &FilterSettings) -> Self {
        Self::with_theme_set(ThemeSet::load_defaults(), settings)
    }

    pub fn with_theme_set(theme_set: ThemeSet, settings: &FilterSettings) -> Self {
        Self {
            theme_set,
            light: settings.syntax_theme_light,
            dark: settings.syntax_theme_dark,
            class_prefix: settings.class_prefix.clone(),
        }
    }

    pub fn definition(&self, name: ThemeName) -> Result<ThemeDefinition> {
        let key = match name {
            ThemeName::Light => self.light.theme_key(),
            ThemeName::Dark => self.dark.theme_key(),
        };
        let theme = self
            .theme_set
            .themes
            .get(key)
            .ok_or_else(|| FilterError::ThemeMissing(key.to_string()))?;
        Ok(ThemeDefinition::from_syntect(name, theme))
    }

    pub fn generate_css(&self, name: ThemeName) -> Result<String> {
        let definition = self.definition(name)?;
        let css = definition.to_css(&self.class_prefix);
        debug!(theme = %definition.name(), rules = css.lines().count(), "Generated stylesheet");
        Ok(css)
    }

    /// Like `generate_css`, for callers holding a theme name as text.
    /// Names other than `light` and `dark` are a caller bug.
    pub fn generate_css_named(&self, name: &str) -> Result<String> {
        self.generate_css(name.parse()?)
    }
}
