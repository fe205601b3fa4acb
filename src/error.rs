/// Errors are reported through `anyhow` with context describing the file or step that failed.
pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
