use thiserror::Error;

#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("distribution setup failed: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error("model error: {0}")]
    Model(String),
}

pub type VitalsResult<T> = std::result::Result<T, VitalsError>;
