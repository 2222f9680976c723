use std::io;

use log::SetLoggerError;
use thiserror::Error;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Debug, Error)]
pub enum InitSubscriberError {
    #[error("Failed to redirect log records: {0}")]
    LogRedirect(#[from] SetLoggerError),

    #[error("Failed to set tracing subscriber: {0}")]
    GlobalDefault(#[from] SetGlobalDefaultError),
}

/// Compose multiple layers into a tracing subscriber.
///
/// The layers used allow filtering tracing spans based on the logging level set as an environment
/// variable. When `RUST_LOG` is not set, `env_filter` is used instead. The logs are sent to stdout
/// in Bunyan compatible format.
pub fn make_subscriber(name: impl Into<String>, env_filter: impl Into<String>) -> impl Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter.into()));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), io::stdout);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Initializes the given tracing subscriber by setting it as global default. This function also
/// redirects all `log` calls to the given subscriber.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), InitSubscriberError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;

    Ok(())
}

/// Builds a `map_err` closure that logs the error at `error` level before converting it with
/// `$map`. The remaining arguments are passed to `tracing::error!` as fields and message.
///
/// ```ignore
/// ddb.get_item(input)
///     .await
///     .map_err(simple_err_map!(DatastoreError::request, table_name, "GetItem failed."))?;
/// ```
#[macro_export]
macro_rules! simple_err_map {
    ($map:expr, $($arg:tt)+) => {
        |e| {
            tracing::error!(error = ?e, $($arg)+);
            $map(e)
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, PartialEq)]
    enum LoadError {
        Backend(String),
    }

    fn load(table: &str) -> Result<u32, String> {
        Err(format!("{} is unavailable", table))
    }

    #[test]
    fn maps_the_error_with_the_given_function() {
        let table_name = "users";

        let err = load(table_name)
            .map_err(simple_err_map!(LoadError::Backend, table_name, "Load failed."))
            .unwrap_err();

        assert_eq!(err, LoadError::Backend("users is unavailable".to_string()));
    }

    #[test]
    fn passes_the_ok_value_through() {
        let loaded: Result<u32, String> = Ok(7);

        assert_eq!(loaded.map_err(simple_err_map!(LoadError::Backend, "Load failed.")), Ok(7));
    }
}
