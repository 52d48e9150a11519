// Applies a move that survived its challenges.

use rand::Rng;
use tracing::trace;
use crate::action::{Action, Move};
use crate::{Character, Coup, CoupError, Violation};

impl Coup {
    /// Resolves the action's coin and card effects. Returns the card the target
    /// turned face up, if any.
    pub(crate) fn apply<R: Rng + Sized>(&mut self, action: &Action, blocked: bool, rng: &mut R) -> Result<Option<Character>, CoupError> {
        let actor = action.actor;
        trace!(?action, blocked, "applying");

        match action.mv {
            Move::Income => {
                assert!(!blocked, "income can't be blocked");
                self.players[actor].coins += Move::Income.coin_gain();
            }
            Move::ForeignAid => {
                if !blocked {
                    self.players[actor].coins += Move::ForeignAid.coin_gain();
                }
            }
            Move::Tax => {
                assert!(!blocked, "tax can't be blocked");
                self.players[actor].coins += Move::Tax.coin_gain();
            }
            Move::Coup => {
                assert!(!blocked, "coup can't be blocked");
                let target = self.target_of(action)?;
                self.pay(action)?;

                // target could already be dead from a failed challenge
                if self.players[target].is_alive() {
                    return Ok(Some(self.lose_influence(target, action.mv)?));
                }
            }
            Move::Assassinate => {
                // paid even when blocked, the block only saves the target's card
                let target = self.target_of(action)?;
                self.pay(action)?;

                // target could already be dead from losing a challenge
                if !blocked && self.players[target].is_alive() {
                    return Ok(Some(self.lose_influence(target, action.mv)?));
                }
            }
            Move::Steal => {
                let target = self.target_of(action)?;
                if !blocked {
                    let n = self.players[target].coins.min(Move::Steal.coin_gain());
                    self.players[actor].coins += n;
                    self.players[target].coins -= n;
                }
            }
            Move::Exchange => {
                assert!(!blocked, "exchange can't be blocked");
                self.exchange(actor, rng)?;
            }
        }

        Ok(None)
    }

    fn target_of(&self, action: &Action) -> Result<usize, CoupError> {
        action.target.ok_or_else(|| self.illegal(action.actor, action.mv, Violation::MissingTarget))
    }

    fn pay(&mut self, action: &Action) -> Result<(), CoupError> {
        let required = action.mv.coin_cost();
        let held = self.players[action.actor].coins;
        if held < required {
            return Err(self.illegal(action.actor, action.mv, Violation::InsufficientCoins { required, held }));
        }
        self.players[action.actor].coins -= required;
        Ok(())
    }

    /// Offers the player their hand plus two cards off the deck; they keep as
    /// many as they held and the rest are shuffled back.
    fn exchange<R: Rng + Sized>(&mut self, player_idx: usize, rng: &mut R) -> Result<(), CoupError> {
        let keep_count = self.players[player_idx].hand.len();
        let mut offered = self.players[player_idx].hand.clone();
        offered.push(self.deck.deal()?);
        offered.push(self.deck.deal()?);

        let chosen = self.agents[player_idx].choose_exchange_cards(&offered, keep_count);

        let mut returned = offered;
        let mut valid = chosen.len() == keep_count;
        for card in &chosen {
            match returned.iter().position(|c| c == card) {
                Some(idx) => {
                    returned.remove(idx);
                }
                None => valid = false,
            }
        }
        if !valid {
            return Err(self.illegal(player_idx, Move::Exchange, Violation::InvalidExchangeChoice));
        }

        trace!(player = player_idx, kept = ?chosen, returned = ?returned, "exchanged");
        self.players[player_idx].hand = chosen;
        for card in returned {
            self.deck.return_card(card);
        }
        self.deck.shuffle(rng);

        Ok(())
    }
}
