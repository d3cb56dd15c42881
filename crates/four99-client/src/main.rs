use clap::Parser;
use four99_client::error::ClientError;
use four99_client::session::ClientSession;
use std::io;
use std::process;

/// Terminal client for the four99 game server.
#[derive(Debug, Parser)]
#[command(name = "four99-client", disable_help_flag = true)]
struct Cli {
    /// Player name sent to the server.
    name: String,

    /// Game to join; play starts once four players name the same game.
    game: String,

    /// Server TCP port.
    port: String,

    /// Server host, defaulting to localhost.
    host: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(err.exit_code());
    }
}

fn run() -> Result<(), ClientError> {
    let cli = Cli::try_parse().map_err(|_| ClientError::Usage)?;
    if cli.name.is_empty() || cli.game.is_empty() {
        return Err(ClientError::InvalidArguments);
    }
    let port = parse_port(&cli.port)?;
    let host = cli.host.unwrap_or_else(|| "localhost".to_string());
    let mut session = ClientSession::connect(
        &host,
        port,
        &cli.name,
        &cli.game,
        io::stdin().lock(),
        io::stdout(),
    )?;
    session.run()
}

fn parse_port(text: &str) -> Result<u16, ClientError> {
    match text.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ClientError::InvalidArguments),
    }
}
