use thiserror::Error;

#[derive(Debug, Error)]
pub enum Id3Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("record has no value for attribute '{attribute}'")]
    MissingAttribute { attribute: String },

    #[error("no branch for value '{value}' of attribute '{attribute}'")]
    PredictionGap { attribute: String, value: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("model has not been trained")]
    NotTrained,

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Id3Error {
    pub fn missing_attribute(attribute: &str) -> Self {
        Id3Error::MissingAttribute {
            attribute: attribute.to_string(),
        }
    }
}
