pub mod action;
pub mod agent;
pub mod config;
pub mod deck;
mod resolve;
mod turn;
pub mod view;

pub use action::{Action, ActionInfo, Move};
pub use agent::{Agent, IncomeAgent, RandomAgent};
pub use config::GameConfig;
pub use deck::Deck;
pub use view::{DeclaredMove, GameView, TurnRecord, TurnView};

use std::fmt::{Debug, Formatter};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static CHARACTER_VARIANTS: [Character; 5] = [
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
];

/// The precondition an agent broke.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("needs {required} coins but holds {held}")]
    InsufficientCoins { required: u32, held: u32 },
    #[error("no target was given")]
    MissingTarget,
    #[error("a target was given for an untargeted move")]
    UnexpectedTarget,
    #[error("targeted themselves")]
    TargetIsSelf,
    #[error("target offset {target} is outside a {num_players} player game")]
    TargetOutOfRange { target: usize, num_players: usize },
    #[error("player {target} is already out of the game")]
    DeadTarget { target: usize },
    #[error("holds {coins} coins and must coup")]
    MustCoup { coins: u32 },
    #[error("kept cards that weren't offered, or the wrong number of them")]
    InvalidExchangeChoice,
    #[error("chose card {index} from a hand of {hand_size}")]
    InvalidInfluenceChoice { index: usize, hand_size: usize },
}

#[derive(Debug, Error)]
pub enum CoupError {
    #[error("a game needs at least 2 players, got {num_players}")]
    NotEnoughPlayers { num_players: usize },
    #[error("players must be dealt at least one card")]
    NoStartingCards,
    #[error("forcing a coup at {threshold} coins, below its cost of {cost}")]
    ForcedCoupUnaffordable { threshold: u32, cost: u32 },
    #[error("deck of {deck_size} cards is too small, this table needs {required}")]
    DeckTooSmall { deck_size: usize, required: usize },
    #[error("tried to deal from an empty deck")]
    DeckExhausted,
    #[error("player {player} ({name}) broke the rules while playing {mv:?}: {violation}")]
    IllegalMove {
        player: usize,
        name: String,
        mv: Move,
        violation: Violation,
    },
    #[error("the game isn't over yet")]
    GameNotOver,
    #[error("the game is already over")]
    GameOver,
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Eq, PartialEq)]
pub struct Player {
    name: String,
    coins: u32,
    hand: Vec<Character>,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn hand(&self) -> &[Character] {
        &self.hand
    }

    pub fn is_alive(&self) -> bool {
        !self.hand.is_empty()
    }
}

pub struct Coup {
    turn: usize,
    current_player_idx: usize,
    deck: Deck,
    players: Vec<Player>,
    agents: Vec<Box<dyn Agent>>,
    // face up, lost influence
    discarded: Vec<Character>,
    config: GameConfig,
}

impl Debug for Coup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("T {} | P {} | deck {}\n", self.turn, self.current_player_idx, self.deck.len()).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            f.write_str(format!("\tP {player_idx} {}: ${} | {:?}\n", player.name, player.coins, player.hand).as_str())?;
        }
        f.write_str(format!("\tdiscarded {:?}\n", self.discarded).as_str())
    }
}

impl Coup {
    /// Sets up a game with the configured deck shuffled.
    pub fn new<R: Rng + Sized>(agents: Vec<(String, Box<dyn Agent>)>, config: GameConfig, rng: &mut R) -> Result<Self, CoupError> {
        let mut deck = Deck::new(config.deck());
        deck.shuffle(rng);
        Self::from_deck(agents, deck, config)
    }

    /// Sets up a game dealing straight off the given deck, in order.
    pub fn from_deck(agents: Vec<(String, Box<dyn Agent>)>, mut deck: Deck, config: GameConfig) -> Result<Self, CoupError> {
        let num_players = agents.len();
        if num_players < 2 {
            return Err(CoupError::NotEnoughPlayers { num_players });
        }
        config.validate()?;

        let required = config.required_deck_size(num_players);
        if deck.len() < required {
            return Err(CoupError::DeckTooSmall { deck_size: deck.len(), required });
        }

        let mut players = Vec::with_capacity(num_players);
        let mut seated_agents = Vec::with_capacity(num_players);
        for (name, agent) in agents {
            let hand = (0..config.cards_per_player)
                .map(|_| deck.deal())
                .collect::<Result<Vec<Character>, CoupError>>()?;
            players.push(Player { name, coins: config.starting_coins, hand });
            seated_agents.push(agent);
        }

        let mut game = Self {
            turn: 0,
            current_player_idx: 0,
            deck,
            players,
            agents: seated_agents,
            discarded: Vec::new(),
            config,
        };

        for player_idx in game.players_indexes() {
            let view = game.game_view(player_idx);
            game.agents[player_idx].load_initial_view(&view);
        }

        debug!(num_players, deck = game.deck.len(), "game set up");
        Ok(game)
    }

    pub fn players_indexes(&self) -> std::ops::Range<usize> {
        0..self.players.len()
    }

    pub fn player(&self, player_idx: usize) -> &Player {
        &self.players[player_idx]
    }

    pub fn player_name(&self, player_idx: usize) -> &str {
        &self.players[player_idx].name
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn current_player_idx(&self) -> usize {
        self.current_player_idx
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discarded(&self) -> &[Character] {
        &self.discarded
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Living players other than `exclude_idx`, in turn order starting after them.
    fn other_player_indexes(&self, exclude_idx: usize) -> Vec<usize> {
        (1..self.players.len())
            .map(|n| (exclude_idx + n) % self.players.len())
            .filter(|&player_idx| self.players[player_idx].is_alive())
            .collect()
    }

    fn must_coup(&self, player_idx: usize) -> bool {
        match self.config.forced_coup_coins {
            Some(threshold) => self.players[player_idx].coins >= threshold,
            None => false,
        }
    }

    fn illegal(&self, player_idx: usize, mv: Move, violation: Violation) -> CoupError {
        warn!(player = player_idx, name = %self.players[player_idx].name, ?mv, %violation, "illegal move");
        CoupError::IllegalMove {
            player: player_idx,
            name: self.players[player_idx].name.clone(),
            mv,
            violation,
        }
    }

    /// Turns one of the player's cards face up, letting them pick which.
    fn lose_influence(&mut self, player_idx: usize, mv: Move) -> Result<Character, CoupError> {
        let hand_size = self.players[player_idx].hand.len();
        let index = self.agents[player_idx].choose_influence_to_lose(&self.players[player_idx].hand);
        if index >= hand_size {
            return Err(self.illegal(player_idx, mv, Violation::InvalidInfluenceChoice { index, hand_size }));
        }

        let card = self.players[player_idx].hand.remove(index);
        self.discarded.push(card);
        trace!(player = player_idx, ?card, "lost influence");
        Ok(card)
    }

    /// Shows a character to win a challenge, then shuffles it away and draws
    /// a replacement into the same slot.
    fn reveal_and_replace<R: Rng + Sized>(&mut self, player_idx: usize, character: Character, rng: &mut R) -> Result<Character, CoupError> {
        let card_idx = match self.players[player_idx].hand.iter().position(|&c| c == character) {
            Some(card_idx) => card_idx,
            None => unreachable!("player {player_idx} can only reveal a character they hold"),
        };

        let replacement = self.deck.swap(character, rng)?;
        self.players[player_idx].hand[card_idx] = replacement;
        trace!(player = player_idx, revealed = ?character, "revealed and redrew");
        Ok(character)
    }

    pub fn is_game_over(&self) -> bool {
        self.players.iter().filter(|player| player.is_alive()).count() <= 1
    }

    pub fn winner(&self) -> Result<usize, CoupError> {
        if !self.is_game_over() {
            return Err(CoupError::GameNotOver);
        }

        self.players
            .iter()
            .position(|player| player.is_alive())
            .ok_or(CoupError::GameNotOver)
    }

    /// Plays turns until one player is left and returns their seat.
    pub fn play<R: Rng + Sized>(&mut self, rng: &mut R) -> Result<usize, CoupError> {
        while !self.is_game_over() {
            self.play_turn(rng)?;
        }

        let winner = self.winner()?;
        debug!(winner, name = %self.players[winner].name, turns = self.turn, "game over");
        Ok(winner)
    }
}
