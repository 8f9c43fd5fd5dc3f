use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermError {
    #[error("{0}")]
    Args(String),

    #[error("config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: starwish::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
