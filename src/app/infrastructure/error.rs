use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Syntax theme not bundled: {0}")]
    ThemeMissing(String),

    #[error("Lexical provider error: {0}")]
    Provider(String),

    #[error("Tokenize error: {0}")]
    Tokenize(String),
}

/// Convenience type alias for Results with FilterError
pub type Result<T> = std::result::Result<T, FilterError>;
