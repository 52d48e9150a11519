//! The decision-making side of a seat.
//!
//! The game never sees a concrete strategy, only `Box<dyn Agent>`. Every index
//! an agent is given or returns is a seat offset from that agent (see [`crate::view`]).

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use crate::action::{ActionInfo, Move};
use crate::view::{DeclaredMove, GameView, TurnView};
use crate::Character;

pub trait Agent {
    /// Called once per seat after the deal, before the first turn.
    fn load_initial_view(&mut self, view: &GameView);

    /// Picks the move for this turn. Declaring a move the player can't make
    /// (too few coins, bad target) ends the game with an error.
    fn declare_move(&mut self, view: &GameView) -> ActionInfo;

    fn decide_challenge(&mut self, declared: &DeclaredMove) -> bool;

    fn decide_block(&mut self, declared: &DeclaredMove) -> bool;

    /// Asked of the actor only, with `declared.blocker` set.
    fn decide_block_challenge(&mut self, declared: &DeclaredMove) -> bool;

    /// Returns exactly `keep_count` of the offered cards.
    fn choose_exchange_cards(&mut self, offered: &[Character], keep_count: usize) -> Vec<Character>;

    /// Index into `hand` of the card to turn face up. Defaults to the first card.
    fn choose_influence_to_lose(&mut self, _hand: &[Character]) -> usize {
        0
    }

    fn observe(&mut self, turn: &TurnView, view: &GameView);
}

/// Takes income every turn and never contests anything.
#[derive(Copy, Clone, Debug, Default)]
pub struct IncomeAgent;

impl Agent for IncomeAgent {
    fn load_initial_view(&mut self, _view: &GameView) {}

    fn declare_move(&mut self, _view: &GameView) -> ActionInfo {
        ActionInfo::new(Move::Income)
    }

    fn decide_challenge(&mut self, _declared: &DeclaredMove) -> bool {
        false
    }

    fn decide_block(&mut self, _declared: &DeclaredMove) -> bool {
        false
    }

    fn decide_block_challenge(&mut self, _declared: &DeclaredMove) -> bool {
        false
    }

    fn choose_exchange_cards(&mut self, offered: &[Character], keep_count: usize) -> Vec<Character> {
        offered[..keep_count].to_vec()
    }

    fn observe(&mut self, _turn: &TurnView, _view: &GameView) {}
}

/// Picks uniformly among legal declarations, bluffing freely, and contests
/// at fixed rates.
#[derive(Clone, Debug)]
pub struct RandomAgent<R: Rng = Pcg64> {
    rng: R,
    challenge_rate: f64,
    block_rate: f64,
}

impl RandomAgent<Pcg64> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg64::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            challenge_rate: 0.2,
            block_rate: 0.2,
        }
    }

    /// Rates are clamped to `0.0..=1.0`. NaN counts as never.
    pub fn with_rates(mut self, challenge_rate: f64, block_rate: f64) -> Self {
        self.challenge_rate = probability(challenge_rate);
        self.block_rate = probability(block_rate);
        self
    }
}

fn probability(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn load_initial_view(&mut self, _view: &GameView) {}

    fn declare_move(&mut self, view: &GameView) -> ActionInfo {
        view.legal_moves()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(ActionInfo::new(Move::Income))
    }

    fn decide_challenge(&mut self, _declared: &DeclaredMove) -> bool {
        self.rng.gen_bool(self.challenge_rate)
    }

    fn decide_block(&mut self, _declared: &DeclaredMove) -> bool {
        self.rng.gen_bool(self.block_rate)
    }

    fn decide_block_challenge(&mut self, _declared: &DeclaredMove) -> bool {
        self.rng.gen_bool(self.challenge_rate)
    }

    fn choose_exchange_cards(&mut self, offered: &[Character], keep_count: usize) -> Vec<Character> {
        offered.choose_multiple(&mut self.rng, keep_count).copied().collect()
    }

    fn choose_influence_to_lose(&mut self, hand: &[Character]) -> usize {
        if hand.is_empty() {
            0
        } else {
            self.rng.gen_range(0..hand.len())
        }
    }

    fn observe(&mut self, _turn: &TurnView, _view: &GameView) {}
}
