use thiserror::Error;

pub type QuantumResult<T> = Result<T, QuantumError>;

/// Failures raised by the gate builder and the state-vector engine.
///
/// All of them are caller programming errors: they are reported before any
/// amplitude is written, and nothing retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantumError {
    #[error("Dimension Error: {0}")]
    Dimension(String),
    #[error("Invalid Qubits: {0}")]
    InvalidQubits(String),
    #[error("Normalization Error: {0}")]
    Normalization(String),
    #[error("Unknown Gate: {0}")]
    UnknownGate(String),
    #[error("Invalid Parameters: {0}")]
    InvalidParameters(String),
}

impl QuantumError {
    pub fn dimension(message: impl Into<String>) -> Self { QuantumError::Dimension(message.into()) }
    pub fn invalid_qubits(message: impl Into<String>) -> Self { QuantumError::InvalidQubits(message.into()) }
    pub fn normalization(message: impl Into<String>) -> Self { QuantumError::Normalization(message.into()) }
    pub fn unknown_gate(name: impl Into<String>) -> Self { QuantumError::UnknownGate(name.into()) }
    pub fn invalid_parameters(message: impl Into<String>) -> Self { QuantumError::InvalidParameters(message.into()) }
}
