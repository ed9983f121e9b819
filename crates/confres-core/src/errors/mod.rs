use std::error::Error;

/// Base trait for all confres errors
pub trait ConfresError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error was caused by the user's configuration rather than
    /// the environment (IO, permissions)
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the library
pub type ConfresResult<T> = Result<T, Box<dyn ConfresError>>;
