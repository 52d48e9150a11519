use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;
use crate::{Character, CoupError};

/// The face-down court deck. The front of the vec is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Character>,
}

impl Deck {
    pub fn new(cards: Vec<Character>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Character] {
        &self.cards
    }

    pub fn deal(&mut self) -> Result<Character, CoupError> {
        if self.cards.is_empty() {
            return Err(CoupError::DeckExhausted);
        }
        let card = self.cards.remove(0);
        trace!(?card, remaining = self.cards.len(), "dealt");
        Ok(card)
    }

    /// Puts a card back at the bottom. Callers shuffle once they're done returning.
    pub fn return_card(&mut self, card: Character) {
        self.cards.push(card);
    }

    pub fn shuffle<R: Rng + Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Shuffles a card back in and deals a fresh one, used after a character is revealed.
    pub fn swap<R: Rng + Sized>(&mut self, card: Character, rng: &mut R) -> Result<Character, CoupError> {
        self.return_card(card);
        self.shuffle(rng);
        self.deal()
    }
}

impl From<Vec<Character>> for Deck {
    fn from(cards: Vec<Character>) -> Self {
        Self::new(cards)
    }
}
