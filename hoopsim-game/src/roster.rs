//! In-memory player roster.
use serde::{Deserialize, Serialize};

use crate::player::{PlayerId, PlayerRecord};

/// Source of player records, resolved by id.
pub trait PlayerSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a player by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn player(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, Self::Error>;
}

/// Player list loaded from a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<PlayerRecord>,
}

impl Roster {
    #[must_use]
    pub const fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    /// Parse a roster from a JSON array of player records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an array of valid player records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|player| &player.id == id)
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerSource for Roster {
    type Error = std::convert::Infallible;

    fn player(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, Self::Error> {
        Ok(self.get_by_id(id).cloned())
    }
}
