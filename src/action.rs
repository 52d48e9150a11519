use std::fmt::{Debug, Formatter};
use serde::{Deserialize, Serialize};
use crate::Character;
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Assassinate,
    Steal,
    Exchange,
}

pub static MOVE_VARIANTS: [Move; 7] = [
    Move::Income,
    Move::ForeignAid,
    Move::Coup,
    Move::Tax,
    Move::Assassinate,
    Move::Steal,
    Move::Exchange,
];

impl Move {
    pub fn requires_target(self) -> bool {
        matches!(self, Move::Coup | Move::Assassinate | Move::Steal)
    }

    /// Coins paid up front when the move is declared, blocked or not.
    pub fn coin_cost(self) -> u32 {
        match self {
            Move::Coup => 7,
            Move::Assassinate => 3,
            Move::Income | Move::ForeignAid | Move::Tax | Move::Steal | Move::Exchange => 0,
        }
    }

    /// Coins gained on an unblocked resolution. For steal this is the cap, the
    /// target can't lose more than they hold.
    pub fn coin_gain(self) -> u32 {
        match self {
            Move::Income => 1,
            Move::ForeignAid => 2,
            Move::Tax => 3,
            Move::Steal => 2,
            Move::Coup | Move::Assassinate | Move::Exchange => 0,
        }
    }

    /// The character a player must hold to truthfully claim this move.
    pub fn enabling_role(self) -> Option<Character> {
        match self {
            Move::Income | Move::ForeignAid | Move::Coup => None,
            Move::Tax => Some(Duke),
            Move::Assassinate => Some(Assassin),
            Move::Steal => Some(Captain),
            Move::Exchange => Some(Ambassador),
        }
    }

    pub fn blocking_roles(self) -> &'static [Character] {
        match self {
            Move::ForeignAid => &[Duke],
            Move::Assassinate => &[Contessa],
            Move::Steal => &[Captain, Ambassador],
            Move::Income | Move::Coup | Move::Tax | Move::Exchange => &[],
        }
    }

    pub fn enabled_by(self, character: Character) -> bool {
        match self.enabling_role() {
            None => true,
            Some(role) => role == character,
        }
    }

    pub fn blockable_by(self, character: Character) -> bool {
        self.blocking_roles().contains(&character)
    }

    pub fn is_blockable(self) -> bool {
        !self.blocking_roles().is_empty()
    }
}

/// A move as declared by an agent. The target is an offset in the actor's
/// own seat frame: 1 is the next seat clockwise, 0 would be the actor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionInfo {
    pub mv: Move,
    pub target: Option<usize>,
}

impl ActionInfo {
    pub fn new(mv: Move) -> Self {
        Self { mv, target: None }
    }

    pub fn targeting(mv: Move, target: usize) -> Self {
        Self { mv, target: Some(target) }
    }
}

/// A validated declaration with every index resolved to an absolute seat.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub actor: usize,
    pub mv: Move,
    pub target: Option<usize>,
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let player_idx = self.actor;
        match (self.mv, self.target) {
            (Move::Income, _) => {
                f.write_fmt(format_args!("Player {player_idx} takes Income"))
            }
            (Move::ForeignAid, _) => {
                f.write_fmt(format_args!("Player {player_idx} gets foreign aid"))
            }
            (Move::Tax, _) => {
                f.write_fmt(format_args!("Player {player_idx} gets Taxes"))
            }
            (Move::Exchange, _) => {
                f.write_fmt(format_args!("Player {player_idx} exchanges"))
            }
            (Move::Coup, Some(target_player_idx)) => {
                f.write_fmt(format_args!("Player {player_idx} coups {target_player_idx}"))
            }
            (Move::Assassinate, Some(target_player_idx)) => {
                f.write_fmt(format_args!("Player {player_idx} assassinates {target_player_idx}"))
            }
            (Move::Steal, Some(target_player_idx)) => {
                f.write_fmt(format_args!("Player {player_idx} steals from {target_player_idx}"))
            }
            (mv, None) => {
                f.write_fmt(format_args!("Player {player_idx} declares {:?} without a target", mv))
            }
        }
    }
}
