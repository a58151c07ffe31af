use std::collections::{HashMap, VecDeque};

use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use tracing::warn;

use crate::app::domain::token::{Token, TokenKind};
use crate::app::infrastructure::error::{FilterError, Result};

/// Grammar name of the universal fallback tokenizer.
pub const PLAIN_TEXT: &str = "Plain Text";

/// Lazy, single-pass token stream borrowed from the tokenized text.
pub type Tokens<'t> = Box<dyn Iterator<Item = Token<'t>> + 't>;

/// Splits text into classified tokens according to one grammar.
///
/// Implementations must be lossless: the token texts, concatenated in
/// order, are exactly the input.
pub trait Tokenizer {
    /// Name of the grammar this tokenizer applies.
    fn grammar(&self) -> &str;

    fn tokenize<'t>(&'t self, text: &'t str) -> Tokens<'t>;
}

/// Emits the whole input as one unclassified token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Tokenizer for PlainText {
    fn grammar(&self) -> &str {
        PLAIN_TEXT
    }

    fn tokenize<'t>(&'t self, text: &'t str) -> Tokens<'t> {
        Box::new((!text.is_empty()).then(|| Token::plain(text)).into_iter())
    }
}

/// Tokenizer driven by a syntect grammar.
pub struct GrammarTokenizer<'s> {
    syntax: &'s SyntaxReference,
    syntax_set: &'s SyntaxSet,
}

impl<'s> GrammarTokenizer<'s> {
    pub fn new(syntax: &'s SyntaxReference, syntax_set: &'s SyntaxSet) -> Self {
        Self { syntax, syntax_set }
    }
}

impl Tokenizer for GrammarTokenizer<'_> {
    fn grammar(&self) -> &str {
        &self.syntax.name
    }

    fn tokenize<'t>(&'t self, text: &'t str) -> Tokens<'t> {
        Box::new(GrammarTokens {
            grammar: &self.syntax.name,
            syntax_set: self.syntax_set,
            lines: LinesWithEndings::new(text),
            parse_state: ParseState::new(self.syntax),
            stack: ScopeStack::new(),
            pending: VecDeque::new(),
            classes: HashMap::new(),
        })
    }
}

/// Line-at-a-time parse, yielding one token per scope run.
struct GrammarTokens<'t> {
    grammar: &'t str,
    syntax_set: &'t SyntaxSet,
    lines: LinesWithEndings<'t>,
    parse_state: ParseState,
    stack: ScopeStack,
    pending: VecDeque<Token<'t>>,
    classes: HashMap<Scope, Option<ScopeClass>>,
}

impl<'t> GrammarTokens<'t> {
    fn tokenize_line(&mut self, line: &'t str) -> Result<Vec<Token<'t>>> {
        let ops = self
            .parse_state
            .parse_line(line, self.syntax_set)
            .map_err(|e| FilterError::Tokenize(e.to_string()))?;

        let mut tokens = Vec::with_capacity(ops.len() + 1);
        let mut start = 0;
        for (pos, op) in &ops {
            let pos = (*pos).min(line.len());
            if pos > start {
                let kind = kind_for_stack(self.stack.as_slice(), &mut self.classes);
                tokens.push(Token::new(kind, &line[start..pos]));
                start = pos;
            }
            self.stack
                .apply(op)
                .map_err(|e| FilterError::Tokenize(format!("{e:?}")))?;
        }
        if start < line.len() {
            let kind = kind_for_stack(self.stack.as_slice(), &mut self.classes);
            tokens.push(Token::new(kind, &line[start..]));
        }
        Ok(tokens)
    }
}

impl<'t> Iterator for GrammarTokens<'t> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let remainder = self.lines.remainder();
            let line = self.lines.next()?;
            match self.tokenize_line(line) {
                Ok(tokens) => self.pending.extend(tokens),
                Err(e) => {
                    warn!(grammar = self.grammar, error = %e, "Grammar failed mid-document, emitting the rest as plain text");
                    self.lines.finish();
                    return Some(Token::plain(remainder));
                }
            }
        }
    }
}

/// How strongly a grammar scope determines a token's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeClass {
    Strong(TokenKind),
    /// Only used when no enclosing scope classifies strongly.
    Weak(TokenKind),
}

/// Scope-name prefixes, most specific first.
const SCOPE_RULES: &[(&str, TokenKind)] = &[
    ("comment", TokenKind::Comment),
    ("string.regexp", TokenKind::Regex),
    ("constant.character.escape", TokenKind::Escape),
    ("string", TokenKind::String),
    ("constant.numeric", TokenKind::Number),
    ("constant", TokenKind::Constant),
    ("keyword.operator", TokenKind::Operator),
    ("keyword", TokenKind::Keyword),
    ("storage.type", TokenKind::KeywordType),
    ("storage", TokenKind::Keyword),
    ("meta.preprocessor", TokenKind::Preprocessor),
    ("entity.name.function", TokenKind::Function),
    ("support.function", TokenKind::Function),
    ("variable.function", TokenKind::Function),
    ("entity.name.tag", TokenKind::Tag),
    ("entity.other.attribute-name", TokenKind::Attribute),
    ("entity.other.inherited-class", TokenKind::Type),
    ("entity.name", TokenKind::Type),
    ("support.type", TokenKind::Type),
    ("support.class", TokenKind::Type),
    ("support", TokenKind::Builtin),
    ("variable.language", TokenKind::Builtin),
    ("variable", TokenKind::Variable),
    ("markup.heading", TokenKind::Heading),
    ("markup.italic", TokenKind::Emphasis),
    ("markup.bold", TokenKind::Strong),
    ("markup.inserted", TokenKind::Inserted),
    ("markup.deleted", TokenKind::Deleted),
    ("invalid", TokenKind::Error),
];

fn has_scope_prefix(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

fn classify_scope_name(name: &str) -> Option<ScopeClass> {
    if has_scope_prefix(name, "punctuation") {
        return Some(ScopeClass::Weak(TokenKind::Punctuation));
    }
    SCOPE_RULES
        .iter()
        .find(|(prefix, _)| has_scope_prefix(name, prefix))
        .map(|&(_, kind)| ScopeClass::Strong(kind))
}

/// Innermost strong classification wins; punctuation only as a last resort.
fn kind_for_stack(stack: &[Scope], cache: &mut HashMap<Scope, Option<ScopeClass>>) -> TokenKind {
    let mut weak = None;
    for scope in stack.iter().rev() {
        let class = *cache
            .entry(*scope)
            .or_insert_with(|| classify_scope_name(&scope.build_string()));
        match class {
            Some(ScopeClass::Strong(kind)) => return kind,
            Some(ScopeClass::Weak(kind)) => {
                weak.get_or_insert(kind);
            }
            None => {}
        }
    }
    weak.unwrap_or(TokenKind::Plain)
}

/// Iterator that yields lines including their line endings.
pub(super) struct LinesWithEndings<'a> {
    text: &'a str,
}

impl<'a> LinesWithEndings<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Text not yet yielded, starting with the next line.
    pub(super) fn remainder(&self) -> &'a str {
        self.text
    }

    pub(super) fn finish(&mut self) {
        self.text = "";
    }
}

impl<'a> Iterator for LinesWithEndings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.text.is_empty() {
            return None;
        }
        let end = self.text.find('\n').map(|i| i + 1).unwrap_or(self.text.len());
        let line = &self.text[..end];
        self.text = &self.text[end..];
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn concat(tokens: Tokens<'_>) -> String {
        tokens.map(|t| t.text).collect()
    }

    fn rust_tokenizer(syntax_set: &SyntaxSet) -> GrammarTokenizer<'_> {
        let syntax = syntax_set.find_syntax_by_name("Rust").unwrap();
        GrammarTokenizer::new(syntax, syntax_set)
    }

    #[test]
    fn test_plain_text_single_token() {
        let tokens: Vec<Token> = PlainText.tokenize("hello world").collect();
        assert_eq!(tokens, vec![Token::plain("hello world")]);
        assert_eq!(PlainText.grammar(), PLAIN_TEXT);
    }

    #[test]
    fn test_plain_text_empty_input() {
        assert_eq!(PlainText.tokenize("").count(), 0);
    }

    #[test]
    fn test_grammar_tokenizer_classifies_rust() {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let tokenizer = rust_tokenizer(&syntax_set);
        let text = "// note\nfn main() { let s = \"hi\"; let n = 42; }\n";
        let tokens: Vec<Token> = tokenizer.tokenize(text).collect();

        let kind_of = |needle: &str| {
            tokens
                .iter()
                .find(|t| t.text.contains(needle))
                .map(|t| t.kind)
        };
        assert_eq!(kind_of("note"), Some(TokenKind::Comment));
        assert_eq!(kind_of("hi"), Some(TokenKind::String));
        assert_eq!(kind_of("42"), Some(TokenKind::Number));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Keyword || t.kind == TokenKind::KeywordType));
        assert_eq!(tokens.iter().map(|t| t.text).collect::<String>(), text);
    }

    #[test]
    fn test_string_quotes_are_strings_not_punctuation() {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let tokenizer = rust_tokenizer(&syntax_set);
        let tokens: Vec<Token> = tokenizer.tokenize("let s = \"x\";\n").collect();
        let quote = tokens.iter().find(|t| t.text.starts_with('"')).unwrap();
        assert_eq!(quote.kind, TokenKind::String);
    }

    #[test]
    fn test_grammar_tokenizer_without_trailing_newline() {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let tokenizer = rust_tokenizer(&syntax_set);
        assert_eq!(concat(tokenizer.tokenize("fn a() {}")), "fn a() {}");
        assert_eq!(tokenizer.tokenize("").count(), 0);
    }

    #[test]
    fn test_scope_prefix_respects_atom_boundaries() {
        assert!(has_scope_prefix("keyword.operator.arithmetic.rust", "keyword.operator"));
        assert!(has_scope_prefix("comment", "comment"));
        assert!(!has_scope_prefix("commentary.block", "comment"));
        assert!(!has_scope_prefix("keyword", "keyword.operator"));
    }

    #[test]
    fn test_classify_scope_name() {
        let strong = |name: &str| match classify_scope_name(name) {
            Some(ScopeClass::Strong(kind)) => Some(kind),
            _ => None,
        };
        assert_eq!(strong("keyword.operator.assignment.c"), Some(TokenKind::Operator));
        assert_eq!(strong("keyword.control.rust"), Some(TokenKind::Keyword));
        assert_eq!(strong("string.regexp.js"), Some(TokenKind::Regex));
        assert_eq!(strong("constant.character.escape.rust"), Some(TokenKind::Escape));
        assert_eq!(strong("constant.numeric.integer.decimal.rust"), Some(TokenKind::Number));
        assert_eq!(strong("entity.name.function.rust"), Some(TokenKind::Function));
        assert_eq!(strong("entity.name.struct.rust"), Some(TokenKind::Type));
        assert_eq!(strong("entity.name.tag.html"), Some(TokenKind::Tag));
        assert_eq!(strong("variable.language.self.rust"), Some(TokenKind::Builtin));
        assert_eq!(strong("markup.inserted.diff"), Some(TokenKind::Inserted));
        assert_eq!(strong("source.rust"), None);
        assert_eq!(
            classify_scope_name("punctuation.terminator.rust"),
            Some(ScopeClass::Weak(TokenKind::Punctuation))
        );
    }

    #[test]
    fn test_kind_for_stack_prefers_strong_enclosing_scope() {
        let mut cache = HashMap::new();
        let stack = [
            Scope::new("source.rust").unwrap(),
            Scope::new("string.quoted.double.rust").unwrap(),
            Scope::new("punctuation.definition.string.begin.rust").unwrap(),
        ];
        assert_eq!(kind_for_stack(&stack, &mut cache), TokenKind::String);

        let stack = [
            Scope::new("source.rust").unwrap(),
            Scope::new("punctuation.terminator.rust").unwrap(),
        ];
        assert_eq!(kind_for_stack(&stack, &mut cache), TokenKind::Punctuation);

        let stack = [Scope::new("source.rust").unwrap()];
        assert_eq!(kind_for_stack(&stack, &mut cache), TokenKind::Plain);
        assert_eq!(kind_for_stack(&[], &mut cache), TokenKind::Plain);
    }

    #[test]
    fn test_lines_with_endings() {
        let mut lines = LinesWithEndings::new("a\nb\r\nc");
        assert_eq!(lines.remainder(), "a\nb\r\nc");
        assert_eq!(lines.next(), Some("a\n"));
        assert_eq!(lines.remainder(), "b\r\nc");
        assert_eq!(lines.next(), Some("b\r\n"));
        assert_eq!(lines.next(), Some("c"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_lines_finish() {
        let mut lines = LinesWithEndings::new("a\nb\n");
        lines.next();
        lines.finish();
        assert_eq!(lines.next(), None);
        assert_eq!(lines.remainder(), "");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_grammar_tokenization_is_lossless(text in "[ -~\n\t\u{e9}\u{4e2d}]{0,200}") {
            let syntax_set = SyntaxSet::load_defaults_newlines();
            let tokenizer = rust_tokenizer(&syntax_set);
            prop_assert_eq!(concat(tokenizer.tokenize(&text)), text.clone());
        }

        #[test]
        fn prop_plain_tokenization_is_lossless(text in any::<String>()) {
            prop_assert_eq!(concat(PlainText.tokenize(&text)), text.clone());
        }
    }
}
