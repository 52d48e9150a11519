use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{Character, CoupError, Move, CHARACTER_VARIANTS};

/// Table rules for one game. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cards_per_player: usize,
    pub starting_coins: u32,
    pub copies_per_character: usize,
    /// Players holding at least this many coins must coup.
    pub forced_coup_coins: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cards_per_player: 2,
            starting_coins: 2,
            copies_per_character: 3,
            forced_coup_coins: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, CoupError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Rejects tables that can't be played out.
    pub fn validate(&self) -> Result<(), CoupError> {
        if self.cards_per_player == 0 {
            return Err(CoupError::NoStartingCards);
        }

        let cost = Move::Coup.coin_cost();
        match self.forced_coup_coins {
            Some(threshold) if threshold < cost => Err(CoupError::ForcedCoupUnaffordable { threshold, cost }),
            _ => Ok(()),
        }
    }

    /// The unshuffled deck, every character repeated `copies_per_character` times.
    pub fn deck(&self) -> Vec<Character> {
        CHARACTER_VARIANTS.iter()
            .flat_map(|&card| std::iter::repeat(card).take(self.copies_per_character))
            .collect()
    }

    // two spare cards so an exchange can always be offered
    pub fn required_deck_size(&self, num_players: usize) -> usize {
        num_players * self.cards_per_player + 2
    }
}
