use four99_core::wire::ServerMessage;
use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("peer disconnected")]
    Disconnected,
    #[error("channel i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// One player's socket, split into a buffered line reader and a writer
/// clone so reads and writes do not fight over buffering.
pub struct PlayerChannel {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl PlayerChannel {
    pub fn new(stream: TcpStream) -> Result<Self, ChannelError> {
        stream.set_nodelay(true)?;
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Sends one message as a newline-terminated line, flushed
    /// immediately so prompts are never stuck in a buffer.
    pub fn send(&mut self, message: &ServerMessage) -> Result<(), ChannelError> {
        self.writer.write_all(message.encode().as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Receives one line, stripped of its terminator. A clean EOF is
    /// reported as a disconnect rather than an empty line.
    pub fn recv(&mut self) -> Result<String, ChannelError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(ChannelError::Disconnected);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// A connected, handshake-complete player waiting for (or inside) a
/// game session.
pub struct Player {
    pub name: String,
    pub channel: PlayerChannel,
}
