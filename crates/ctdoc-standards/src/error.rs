#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to parse embedded catalogue {name}: {source}")]
    Toml {
        name: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalogue {name}: {source}")]
    InvalidField {
        name: &'static str,
        #[source]
        source: ctdoc_model::ModelError,
    },
}

pub type Result<T> = std::result::Result<T, StandardsError>;
