use crate::adaptor::AdaptorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Construction-time configuration problem, e.g. a blank prefix.
    #[error("config error: {0}")]
    Config(String),

    /// A user passed to `start` is missing its id or username.
    #[error("`id` and `username` are required when logging in a user")]
    InvalidUser,

    /// The (category, action) pair is not in the taxonomy.
    #[error("unknown event: {category}.{action}")]
    UnknownEvent { category: String, action: String },

    /// An adaptor capability invocation failed.
    #[error(transparent)]
    Adaptor(#[from] AdaptorError),
}

pub type Result<T> = std::result::Result<T, Error>;
