/// Lexical category of a token.
///
/// The set is fixed: the renderer derives CSS classes from it and every
/// theme must carry a style for each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Plain,
    Keyword,
    KeywordType,
    Constant,
    Number,
    String,
    Escape,
    Regex,
    Comment,
    Preprocessor,
    Operator,
    Punctuation,
    Function,
    Type,
    Tag,
    Attribute,
    Variable,
    Builtin,
    Heading,
    Emphasis,
    Strong,
    Inserted,
    Deleted,
    Error,
}

impl TokenKind {
    pub const ALL: [TokenKind; 24] = [
        Self::Plain,
        Self::Keyword,
        Self::KeywordType,
        Self::Constant,
        Self::Number,
        Self::String,
        Self::Escape,
        Self::Regex,
        Self::Comment,
        Self::Preprocessor,
        Self::Operator,
        Self::Punctuation,
        Self::Function,
        Self::Type,
        Self::Tag,
        Self::Attribute,
        Self::Variable,
        Self::Builtin,
        Self::Heading,
        Self::Emphasis,
        Self::Strong,
        Self::Inserted,
        Self::Deleted,
        Self::Error,
    ];

    /// Short CSS class suffix, appended to the configured class prefix.
    pub fn css_suffix(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Keyword => "k",
            Self::KeywordType => "kt",
            Self::Constant => "kc",
            Self::Number => "m",
            Self::String => "s",
            Self::Escape => "se",
            Self::Regex => "sr",
            Self::Comment => "c",
            Self::Preprocessor => "cp",
            Self::Operator => "o",
            Self::Punctuation => "p",
            Self::Function => "nf",
            Self::Type => "nc",
            Self::Tag => "nt",
            Self::Attribute => "na",
            Self::Variable => "nv",
            Self::Builtin => "nb",
            Self::Heading => "gh",
            Self::Emphasis => "ge",
            Self::Strong => "gs",
            Self::Inserted => "gi",
            Self::Deleted => "gd",
            Self::Error => "err",
        }
    }

    pub fn is_plain(self) -> bool {
        self == Self::Plain
    }
}

/// A classified span of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub text: &'t str,
}

impl<'t> Token<'t> {
    pub fn new(kind: TokenKind, text: &'t str) -> Self {
        Self { kind, text }
    }

    pub fn plain(text: &'t str) -> Self {
        Self::new(TokenKind::Plain, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_lists_every_kind_once() {
        let unique: HashSet<TokenKind> = TokenKind::ALL.iter().copied().collect();
        assert_eq!(unique.len(), TokenKind::ALL.len());
        assert_eq!(TokenKind::ALL[0], TokenKind::Plain);
    }

    #[test]
    fn test_css_suffixes_are_unique() {
        let suffixes: HashSet<&str> = TokenKind::ALL.iter().map(|k| k.css_suffix()).collect();
        assert_eq!(suffixes.len(), TokenKind::ALL.len());
    }

    #[test]
    fn test_only_plain_has_empty_suffix() {
        for kind in TokenKind::ALL {
            assert_eq!(kind.css_suffix().is_empty(), kind.is_plain(), "{kind:?}");
        }
    }

    #[test]
    fn test_plain_constructor() {
        let token = Token::plain("hello");
        assert_eq!(token.kind, TokenKind::Plain);
        assert_eq!(token.text, "hello");
    }
}
