use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("No credentials available; set the password environment variable or configure one")]
    MissingCredentials,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}
