use solana_client::client_error::{ClientError, ClientErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("ClientError: {0}")]
    ClientError(#[from] Box<ClientError>),

    #[error("Requested {requested} accounts, response holds {received}")]
    ResponseLengthMismatch { requested: usize, received: usize },

    #[error("Error: `{0}`")]
    CustomError(String),
}

impl From<ClientError> for RpcError {
    fn from(err: ClientError) -> Self {
        RpcError::ClientError(Box::new(err))
    }
}

impl RpcError {
    /// Transport level failures that may succeed when sent again.
    pub fn is_transient(&self) -> bool {
        match self {
            RpcError::ClientError(err) => {
                matches!(err.kind(), ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_))
            }
            _ => false,
        }
    }
}
