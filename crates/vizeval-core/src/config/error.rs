use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading or validating configuration.
pub enum ConfigError {
    /// The port value could not be parsed.
    #[error("invalid port '{value}': must be a number between 1 and 65535")]
    InvalidPort {
        /// Offending value.
        value: String,
    },

    /// The bind address could not be parsed.
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr {
        /// Offending value.
        value: String,
    },

    /// The poll interval could not be parsed or was zero.
    #[error("invalid poll interval '{value}': must be a positive number of milliseconds")]
    InvalidPollInterval {
        /// Offending value.
        value: String,
    },

    /// A REST backend URL was given without a service key (or vice versa).
    #[error("VIZEVAL_REST_URL and VIZEVAL_REST_SERVICE_KEY must be set together")]
    IncompleteRestConfig,
}
