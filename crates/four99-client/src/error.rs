use std::io;
use thiserror::Error;

/// Fatal client errors with their fixed diagnostics and exit codes.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Usage: four99-client name game port [host]")]
    Usage,
    #[error("Bad Server.")]
    Connect(#[source] io::Error),
    #[error("Invalid Arguments.")]
    InvalidArguments,
    #[error("Protocol Error.")]
    Protocol,
    #[error("User Quit.")]
    UserQuit,
    #[error("System Error.")]
    System(#[source] io::Error),
}

impl ClientError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Usage => 1,
            ClientError::Connect(_) => 2,
            ClientError::InvalidArguments => 4,
            ClientError::Protocol => 6,
            ClientError::UserQuit => 7,
            ClientError::System(_) => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn exit_codes_match_diagnostics() {
        assert_eq!(ClientError::Usage.exit_code(), 1);
        assert_eq!(ClientError::InvalidArguments.exit_code(), 4);
        assert_eq!(ClientError::Protocol.exit_code(), 6);
        assert_eq!(ClientError::UserQuit.exit_code(), 7);
        assert_eq!(ClientError::InvalidArguments.to_string(), "Invalid Arguments.");
        assert_eq!(ClientError::Protocol.to_string(), "Protocol Error.");
    }
}
