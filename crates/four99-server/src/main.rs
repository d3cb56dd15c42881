use clap::Parser;
use four99_server::acceptor::{Acceptor, bind};
use four99_server::decks::load_pool;
use four99_server::error::ServerError;
use four99_server::registry::SessionRegistry;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Four-player trick-taking game server.
#[derive(Debug, Parser)]
#[command(name = "four99-server", disable_help_flag = true)]
struct Cli {
    /// TCP port to listen on (1024-65535).
    #[arg(allow_hyphen_values = true)]
    port: String,

    /// Greeting sent to every connecting client.
    greeting: String,

    /// File of pre-arranged decks, one 104-character line per deck.
    deckfile: PathBuf,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(err.exit_code());
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), ServerError> {
    let cli = Cli::try_parse().map_err(|_| ServerError::Usage)?;
    let port = parse_port(&cli.port)?;
    let pool = load_pool(&cli.deckfile)?;
    let listener = bind(port)?;
    let registry = Arc::new(SessionRegistry::new(pool));
    let acceptor = Acceptor::new(listener, cli.greeting, registry);
    tracing::info!(port = acceptor.local_port()?, "listening");
    acceptor.run()
}

/// Port arguments must be a nonzero decimal number; range checking
/// happens at bind time so the two failures report distinctly. A
/// negative number parses here and is refused as out of range.
fn parse_port(text: &str) -> Result<i64, ServerError> {
    match text.parse::<i64>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ServerError::InvalidPort),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_port;
    use four99_server::error::ServerError;

    #[test]
    fn ports_parse_as_nonzero_numbers() {
        assert_eq!(parse_port("4499").unwrap(), 4499);
        assert!(matches!(parse_port("0"), Err(ServerError::InvalidPort)));
        assert!(matches!(parse_port("port"), Err(ServerError::InvalidPort)));
        // Negative and oversized ports parse here; bind refuses them.
        assert_eq!(parse_port("-1").unwrap(), -1);
        assert_eq!(parse_port("70000").unwrap(), 70000);
    }
}
