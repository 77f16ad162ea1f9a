/// Errors produced by a text-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The environment variable expected to hold the API key is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request could not be sent or its body read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("API response error: status {status}")]
    Response { status: u16, body: String },

    /// The response body was not in the expected shape.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A hosted generative-text model.
///
/// One prompt in, one text out. An empty string means the service answered
/// without any text; callers decide what to show instead. Implementations
/// must not retry.
pub trait TextGenerator {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(model, prompt)
    }
}
