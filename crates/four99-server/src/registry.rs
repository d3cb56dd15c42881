use crate::connection::Player;
use crate::session::GameSession;
use four99_core::model::deck::DeckPool;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Groups handshake-complete players by game name until a table of
/// four is ready. A single lock covers the whole map; joins are rare
/// and cheap compared to game traffic.
pub struct SessionRegistry {
    decks: Arc<DeckPool>,
    pending: Mutex<HashMap<String, Vec<Player>>>,
}

impl SessionRegistry {
    pub fn new(decks: DeckPool) -> Self {
        Self {
            decks: Arc::new(decks),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Adds a player to the named game. The fourth join drains the
    /// entry and returns a ready-to-run session; the caller owns
    /// spawning it.
    pub fn join(&self, game: &str, player: Player) -> Option<GameSession> {
        let mut pending = self.pending.lock();
        let waiting = pending.entry(game.to_string()).or_default();
        info!(game, player = %player.name, waiting = waiting.len() + 1, "player joined");
        waiting.push(player);
        if waiting.len() < 4 {
            return None;
        }
        let players: [Player; 4] = pending
            .remove(game)
            .and_then(|players| players.try_into().ok())
            .expect("drained entry holds exactly four players");
        Some(GameSession::new(
            game.to_string(),
            players,
            Arc::clone(&self.decks),
        ))
    }
}
