use crate::error::ServerError;
use four99_core::model::deck::DeckPool;
use std::fs;
use std::path::Path;

/// Reads and validates the deck file named on the command line. The
/// whole file is parsed up front so a malformed deck is reported at
/// startup rather than mid-game.
pub fn load_pool(path: &Path) -> Result<DeckPool, ServerError> {
    let text = fs::read_to_string(path).map_err(ServerError::DeckRead)?;
    DeckPool::parse(&text).map_err(ServerError::DeckParse)
}

#[cfg(test)]
mod tests {
    use super::load_pool;
    use crate::error::ServerError;
    use std::io::Write;

    fn canonical_line() -> String {
        let mut line = String::new();
        for suit in "SCDH".chars() {
            for rank in "23456789TJQKA".chars() {
                line.push(rank);
                line.push(suit);
            }
        }
        line
    }

    #[test]
    fn missing_file_is_a_deck_read_error() {
        let err = load_pool(std::path::Path::new("/no/such/deckfile")).unwrap_err();
        assert!(matches!(err, ServerError::DeckRead(_)));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn valid_file_parses_every_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", canonical_line()).unwrap();
        writeln!(file, "{}", canonical_line()).unwrap();
        let pool = load_pool(file.path()).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn truncated_line_is_a_deck_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2S3S").unwrap();
        let err = load_pool(file.path()).unwrap_err();
        assert!(matches!(err, ServerError::DeckParse(_)));
        assert_eq!(err.exit_code(), 6);
    }
}
