use crate::connection::{Player, PlayerChannel};
use crate::error::ServerError;
use crate::registry::SessionRegistry;
use four99_core::wire::ServerMessage;
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Binds the listening socket. Negative ports and ports below 1024
/// are refused up front rather than failing with a permissions error
/// at bind time.
pub fn bind(port: i64) -> Result<TcpListener, ServerError> {
    if !(1024..=65535).contains(&port) {
        return Err(ServerError::PortRange);
    }
    TcpListener::bind(("0.0.0.0", port as u16)).map_err(ServerError::Bind)
}

/// The accept loop. Each new connection is greeted and handed to the
/// registry; full tables get their own session thread.
pub struct Acceptor {
    listener: TcpListener,
    greeting: String,
    registry: Arc<SessionRegistry>,
}

impl Acceptor {
    pub fn new(listener: TcpListener, greeting: String, registry: Arc<SessionRegistry>) -> Self {
        Self {
            listener,
            greeting,
            registry,
        }
    }

    pub fn local_port(&self) -> Result<u16, ServerError> {
        Ok(self.listener.local_addr().map_err(ServerError::System)?.port())
    }

    /// Accepts forever. Individual connection failures are logged and
    /// dropped; only accept() itself failing is fatal.
    pub fn run(&self) -> Result<(), ServerError> {
        loop {
            let (stream, addr) = self.listener.accept().map_err(ServerError::System)?;
            match self.handshake(stream) {
                Ok((player, game)) => {
                    if let Some(session) = self.registry.join(&game, player) {
                        let name = session.game_name().to_string();
                        let spawned = thread::Builder::new()
                            .name(format!("game-{name}"))
                            .spawn(move || session.run());
                        if let Err(err) = spawned {
                            warn!(game = %name, %err, "failed to spawn session thread");
                        }
                    }
                }
                Err(err) => {
                    // A client that hangs up mid-handshake is routine.
                    info!(%addr, %err, "handshake failed");
                }
            }
        }
    }

    /// Greets the connection, then reads the player name and game name
    /// lines. Empty lines are treated as a failed handshake.
    fn handshake(
        &self,
        stream: TcpStream,
    ) -> Result<(Player, String), crate::connection::ChannelError> {
        let mut channel = PlayerChannel::new(stream)?;
        channel.send(&ServerMessage::Info(self.greeting.clone()))?;
        let name = channel.recv()?;
        let game = channel.recv()?;
        if name.is_empty() || game.is_empty() {
            return Err(crate::connection::ChannelError::Disconnected);
        }
        Ok((Player { name, channel }, game))
    }
}
