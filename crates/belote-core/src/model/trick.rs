use crate::model::card::Card;
use crate::model::player::{PLAYER_COUNT, PlayerPosition};
use crate::model::suit::Suit;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerPosition,
    lead_suit: Option<Suit>,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    Incomplete {
        plays: usize,
    },
    NoLeadSuitPlay(Suit),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::Incomplete { plays } => {
                write!(f, "winner requested after {plays} of {PLAYER_COUNT} plays")
            }
            TrickError::NoLeadSuitPlay(suit) => write!(f, "no play follows lead suit {suit}"),
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            lead_suit: None,
            plays: Vec::with_capacity(PLAYER_COUNT),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYER_COUNT
    }

    /// Set by the first play and kept for the life of the trick.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead_suit
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        if self.lead_suit.is_none() {
            self.lead_suit = Some(card.suit);
        }
        self.plays.push(Play { position, card });
        Ok(())
    }

    pub fn winner(&self) -> Result<PlayerPosition, TrickError> {
        let lead_suit = self.lead_suit.ok_or(TrickError::Incomplete {
            plays: self.plays.len(),
        })?;
        rules::compute_winner(&self.plays, lead_suit)
    }

    pub fn winning_card(&self) -> Option<Card> {
        let winner = self.winner().ok()?;
        self.plays
            .iter()
            .find(|play| play.position == winner)
            .map(|play| play.card)
    }
}
