// The turn engine: declare, challenge, block, counter-challenge, resolve, observe.

use rand::Rng;
use tracing::{debug, trace};
use crate::action::{Action, ActionInfo, Move};
use crate::view::{absolute_seat, BlockOutcome, ChallengeOutcome, TurnRecord};
use crate::{Coup, CoupError, Violation};

impl Coup {
    /// Plays out the next living player's turn and returns what happened.
    pub fn play_turn<R: Rng + Sized>(&mut self, rng: &mut R) -> Result<TurnRecord, CoupError> {
        if self.is_game_over() {
            return Err(CoupError::GameOver);
        }

        // seats of eliminated players are passed over
        while !self.players[self.current_player_idx].is_alive() {
            self.current_player_idx = (self.current_player_idx + 1) % self.players.len();
        }
        let actor = self.current_player_idx;

        let view = self.game_view(actor);
        let action_info = self.agents[actor].declare_move(&view);
        let action = self.validate(actor, action_info)?;
        debug!(turn = self.turn, ?action, "declared");

        let mut record = TurnRecord::new(self.turn, action);

        // moves anyone may take are still open to a challenge, which always fails
        if let Some(challenger) = self.find_challenger(&action) {
            record.challenge = Some(self.resolve_challenge(&action, challenger, rng)?);
        }

        // an exposed bluff has nothing left to block
        if record.took_effect() && action.mv.is_blockable() {
            if let Some(blocker) = self.find_blocker(&action) {
                let declared = self.declared_move(&action, actor, Some(blocker));
                let challenge = if self.agents[actor].decide_block_challenge(&declared) {
                    Some(self.resolve_block_challenge(&action, blocker, rng)?)
                } else {
                    None
                };

                record.blocked = match challenge {
                    Some(outcome) => !outcome.success,
                    None => true,
                };
                record.block = Some(BlockOutcome { blocker, challenge });
            }
        }

        if record.took_effect() {
            record.card_lost_to_action = self.apply(&action, record.blocked, rng)?;
        }

        debug!(
            turn = self.turn,
            challenged = record.challenge.is_some(),
            blocked = record.blocked,
            took_effect = record.took_effect(),
            "resolved"
        );

        let num_players = self.players.len();
        for observer in self.players_indexes() {
            let turn_view = record.relative_to(observer, num_players);
            let game_view = self.game_view(observer);
            self.agents[observer].observe(&turn_view, &game_view);
        }

        self.turn += 1;
        self.current_player_idx = (actor + 1) % num_players;

        Ok(record)
    }

    /// Checks a declaration against the actor's coins and the table, and
    /// resolves its target to an absolute seat.
    fn validate(&self, actor: usize, action_info: ActionInfo) -> Result<Action, CoupError> {
        let num_players = self.players.len();
        let mv = action_info.mv;
        let coins = self.players[actor].coins;

        if self.must_coup(actor) && mv != Move::Coup {
            return Err(self.illegal(actor, mv, Violation::MustCoup { coins }));
        }

        if coins < mv.coin_cost() {
            return Err(self.illegal(actor, mv, Violation::InsufficientCoins { required: mv.coin_cost(), held: coins }));
        }

        let target = match (mv.requires_target(), action_info.target) {
            (false, None) => None,
            (false, Some(_)) => return Err(self.illegal(actor, mv, Violation::UnexpectedTarget)),
            (true, None) => return Err(self.illegal(actor, mv, Violation::MissingTarget)),
            (true, Some(0)) => return Err(self.illegal(actor, mv, Violation::TargetIsSelf)),
            (true, Some(offset)) if offset >= num_players => {
                return Err(self.illegal(actor, mv, Violation::TargetOutOfRange { target: offset, num_players }))
            }
            (true, Some(offset)) => {
                let target = absolute_seat(offset, actor, num_players);
                if !self.players[target].is_alive() {
                    return Err(self.illegal(actor, mv, Violation::DeadTarget { target }));
                }
                Some(target)
            }
        };

        Ok(Action { actor, mv, target })
    }

    // only the first player to speak up gets to challenge
    fn find_challenger(&mut self, action: &Action) -> Option<usize> {
        for player_idx in self.other_player_indexes(action.actor) {
            let declared = self.declared_move(action, player_idx, None);
            let challenges = self.agents[player_idx].decide_challenge(&declared);
            trace!(player = player_idx, challenges, "challenge decision");
            if challenges {
                return Some(player_idx);
            }
        }
        None
    }

    fn find_blocker(&mut self, action: &Action) -> Option<usize> {
        for player_idx in self.other_player_indexes(action.actor) {
            let declared = self.declared_move(action, player_idx, None);
            let blocks = self.agents[player_idx].decide_block(&declared);
            trace!(player = player_idx, blocks, "block decision");
            if blocks {
                return Some(player_idx);
            }
        }
        None
    }

    /// The challenge succeeds when the actor holds nothing that enables the move.
    fn resolve_challenge<R: Rng + Sized>(&mut self, action: &Action, challenger: usize, rng: &mut R) -> Result<ChallengeOutcome, CoupError> {
        let proof = self.players[action.actor].hand.iter().copied().find(|&c| action.mv.enabled_by(c));

        let outcome = match proof {
            None => ChallengeOutcome {
                challenger,
                success: true,
                card_lost: self.lose_influence(action.actor, action.mv)?,
                card_revealed: None,
            },
            Some(character) => {
                let card_lost = self.lose_influence(challenger, action.mv)?;
                let card_revealed = self.reveal_and_replace(action.actor, character, rng)?;
                ChallengeOutcome { challenger, success: false, card_lost, card_revealed: Some(card_revealed) }
            }
        };

        debug!(challenger, actor = action.actor, success = outcome.success, card_lost = ?outcome.card_lost, "challenge");
        Ok(outcome)
    }

    /// Only the actor may challenge a block. It succeeds when the blocker holds
    /// nothing that blocks the move.
    fn resolve_block_challenge<R: Rng + Sized>(&mut self, action: &Action, blocker: usize, rng: &mut R) -> Result<ChallengeOutcome, CoupError> {
        let proof = self.players[blocker].hand.iter().copied().find(|&c| action.mv.blockable_by(c));

        let outcome = match proof {
            None => ChallengeOutcome {
                challenger: action.actor,
                success: true,
                card_lost: self.lose_influence(blocker, action.mv)?,
                card_revealed: None,
            },
            Some(character) => {
                let card_lost = self.lose_influence(action.actor, action.mv)?;
                let card_revealed = self.reveal_and_replace(blocker, character, rng)?;
                ChallengeOutcome { challenger: action.actor, success: false, card_lost, card_revealed: Some(card_revealed) }
            }
        };

        debug!(blocker, actor = action.actor, success = outcome.success, card_lost = ?outcome.card_lost, "block challenge");
        Ok(outcome)
    }
}
