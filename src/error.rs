use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrReportError {
    #[error(
        "No credentials found. Pass --token or --username/--password, or add them to the config file."
    )]
    MissingCredentials,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl From<octocrab::Error> for PrReportError {
    fn from(err: octocrab::Error) -> Self {
        PrReportError::GitHub(err.to_string())
    }
}

impl From<handlebars::TemplateError> for PrReportError {
    fn from(err: handlebars::TemplateError) -> Self {
        PrReportError::Template(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PrReportError>;
