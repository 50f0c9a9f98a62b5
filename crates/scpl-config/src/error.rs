/// Fatal configuration problems, raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}
