// What each player is allowed to see. Every index handed to an agent is a seat
// offset from that agent: 0 is the observer, 1 the next seat clockwise, and so on.
// Eliminated seats keep their offsets so indices never drift when players die.

use serde::{Deserialize, Serialize};
use crate::action::{Action, ActionInfo, Move};
use crate::{Character, Coup};

pub(crate) fn relative_seat(seat: usize, observer: usize, num_players: usize) -> usize {
    (seat + num_players - observer) % num_players
}

pub(crate) fn absolute_seat(offset: usize, observer: usize, num_players: usize) -> usize {
    (observer + offset) % num_players
}

/// The outcome of a challenge, either against the declared move or against a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    pub challenger: usize,
    /// True when the challenged player was bluffing.
    pub success: bool,
    pub card_lost: Character,
    /// The character shown to win a failed challenge before it's shuffled away.
    pub card_revealed: Option<Character>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOutcome {
    pub blocker: usize,
    /// Set when the actor challenged the block.
    pub challenge: Option<ChallengeOutcome>,
}

/// Everything that happened during one turn, in absolute seats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: usize,
    pub action: Action,
    pub challenge: Option<ChallengeOutcome>,
    pub block: Option<BlockOutcome>,
    /// Whether a block stood once every challenge was settled.
    pub blocked: bool,
    /// The card a coup or assassination target turned face up.
    pub card_lost_to_action: Option<Character>,
}

impl TurnRecord {
    pub fn new(turn: usize, action: Action) -> Self {
        Self {
            turn,
            action,
            challenge: None,
            block: None,
            blocked: false,
            card_lost_to_action: None,
        }
    }

    /// Whether the declared move survived an opening challenge.
    pub fn took_effect(&self) -> bool {
        !matches!(self.challenge, Some(ChallengeOutcome { success: true, .. }))
    }

    pub fn relative_to(&self, observer: usize, num_players: usize) -> TurnView {
        let seat = |idx: usize| relative_seat(idx, observer, num_players);
        let shift = |outcome: ChallengeOutcome| ChallengeOutcome {
            challenger: seat(outcome.challenger),
            ..outcome
        };

        TurnView {
            observer,
            turn: self.turn,
            actor: seat(self.action.actor),
            action: ActionInfo {
                mv: self.action.mv,
                target: self.action.target.map(|idx| seat(idx)),
            },
            challenge: self.challenge.map(|outcome| shift(outcome)),
            block: self.block.map(|block| BlockOutcome {
                blocker: seat(block.blocker),
                challenge: block.challenge.map(|outcome| shift(outcome)),
            }),
            blocked: self.blocked,
            card_lost_to_action: self.card_lost_to_action,
        }
    }
}

/// A [`TurnRecord`] from one player's seat.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    /// Absolute seat of the observer, kept for debugging.
    pub observer: usize,
    pub turn: usize,
    pub actor: usize,
    pub action: ActionInfo,
    pub challenge: Option<ChallengeOutcome>,
    pub block: Option<BlockOutcome>,
    pub blocked: bool,
    pub card_lost_to_action: Option<Character>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub offset: usize,
    pub coins: u32,
    pub hand_size: usize,
}

/// The game state as one player knows it: their own hand, and only coins and
/// hand sizes for everyone else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Absolute seat of the observer, kept for debugging.
    pub observer: usize,
    pub num_players: usize,
    pub coins: u32,
    pub hand: Vec<Character>,
    /// Living opponents in turn order.
    pub opponents: Vec<OpponentView>,
    /// Face-up cards of lost influence.
    pub discarded: Vec<Character>,
    pub deck_size: usize,
    pub must_coup: bool,
}

impl GameView {
    pub fn is_alive(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Every declaration the rules allow from this seat right now, bluffs included.
    pub fn legal_moves(&self) -> Vec<ActionInfo> {
        let mut moves = Vec::with_capacity(4 + self.opponents.len() * 3);
        if !self.is_alive() {
            return moves;
        }

        if self.must_coup {
            for opponent in &self.opponents {
                moves.push(ActionInfo::targeting(Move::Coup, opponent.offset));
            }
            return moves;
        }

        moves.push(ActionInfo::new(Move::Income));
        moves.push(ActionInfo::new(Move::ForeignAid));
        moves.push(ActionInfo::new(Move::Tax));
        moves.push(ActionInfo::new(Move::Exchange));

        for opponent in &self.opponents {
            moves.push(ActionInfo::targeting(Move::Steal, opponent.offset));
            if self.coins >= Move::Assassinate.coin_cost() {
                moves.push(ActionInfo::targeting(Move::Assassinate, opponent.offset));
            }
            if self.coins >= Move::Coup.coin_cost() {
                moves.push(ActionInfo::targeting(Move::Coup, opponent.offset));
            }
        }

        moves
    }
}

/// A declared move as shown to the player deciding whether to contest it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredMove {
    pub actor: usize,
    pub mv: Move,
    pub target: Option<usize>,
    /// Only set when the actor is deciding whether to challenge a block.
    pub blocker: Option<usize>,
}

impl DeclaredMove {
    /// Whether the deciding player is the one being targeted.
    pub fn targets_me(&self) -> bool {
        self.target == Some(0)
    }
}

impl Coup {
    pub fn game_view(&self, observer: usize) -> GameView {
        let num_players = self.players.len();
        let player = &self.players[observer];

        let opponents = self.other_player_indexes(observer)
            .into_iter()
            .map(|idx| OpponentView {
                offset: relative_seat(idx, observer, num_players),
                coins: self.players[idx].coins,
                hand_size: self.players[idx].hand.len(),
            })
            .collect();

        GameView {
            observer,
            num_players,
            coins: player.coins,
            hand: player.hand.clone(),
            opponents,
            discarded: self.discarded.clone(),
            deck_size: self.deck.len(),
            must_coup: self.must_coup(observer),
        }
    }

    pub(crate) fn declared_move(&self, action: &Action, observer: usize, blocker: Option<usize>) -> DeclaredMove {
        let num_players = self.players.len();
        DeclaredMove {
            actor: relative_seat(action.actor, observer, num_players),
            mv: action.mv,
            target: action.target.map(|idx| relative_seat(idx, observer, num_players)),
            blocker: blocker.map(|idx| relative_seat(idx, observer, num_players)),
        }
    }
}
