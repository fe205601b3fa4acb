//! Command handlers for the convert CLI.

mod convert;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use convert::convert;

/// The outcome of a command: a one line message for the user plus structured data that is logged
/// as JSON at debug level.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    message: String,
    structure: T,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> &T {
        &self.structure
    }

    /// Logs the message at `info!` and the structured data as JSON at `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Ok(json) = serde_json::to_string_pretty(&self.structure) {
            debug!("Command output:\n\n{json}\n\n");
        }
    }
}
