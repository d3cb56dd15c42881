use std::io;
use thiserror::Error;

/// Fatal startup errors; each maps to a distinct process exit code
/// and a fixed one-line diagnostic.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Usage: four99-server port greeting deckfile")]
    Usage,
    #[error("Invalid Port")]
    InvalidPort,
    #[error("Port Error")]
    PortRange,
    #[error("Port Error")]
    Bind(#[source] io::Error),
    #[error("Deck Error")]
    DeckRead(#[source] io::Error),
    #[error("Deck Error")]
    DeckParse(#[source] four99_core::model::deck::DeckError),
    #[error("System Error")]
    System(#[source] io::Error),
}

impl ServerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ServerError::Usage => 1,
            ServerError::InvalidPort => 4,
            ServerError::PortRange | ServerError::Bind(_) => 5,
            ServerError::DeckRead(_) | ServerError::DeckParse(_) => 6,
            ServerError::System(_) => 8,
        }
    }
}
