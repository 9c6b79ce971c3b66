use std::fmt;

/// Errors that stop a generation run.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// returned if a document could not be parsed as an executable GraphQL document
    #[error("could not parse the GraphQL document '{location}'\nCaused by: {error}")]
    Parse { location: String, error: cynic_parser::Error },
    /// returned if the plugin configuration has an unsupported shape or value
    #[error("invalid plugin configuration: {0}")]
    InvalidConfig(String),
    /// returned by [`validate`](crate::validate) for output files that are not TypeScript sources
    #[error("Plugin \"typescript-react-query\" requires extension to be \".ts\" or \".tsx\"! Got '{0}'")]
    InvalidExtension(String),
    #[error("could not render the generated code")]
    Render(#[from] fmt::Error),
}

impl CodegenError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
