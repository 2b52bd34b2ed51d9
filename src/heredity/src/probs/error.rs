use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbsError {
    #[error("Invalid value for {field}: {value}. Probabilities must lie within [0, 1]")]
    OutOfRange{field: &'static str, value: f64},

    #[error("Gene prior probabilities must sum to 1.0. Got {0}")]
    PriorSum(f64),

    #[error("Failed to open probability tables file {0}: {1}")]
    Open(String, #[source] std::io::Error),

    #[error("Failed to deserialize probability tables: {0}")]
    Deserialize(#[source] serde_yaml::Error),
}
