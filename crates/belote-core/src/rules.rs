//! Follow-suit legality and trick resolution.
//!
//! Only the lead suit can win a trick. A trump suit exists for announcements
//! but never overrides the lead suit here.

use crate::model::card::Card;
use crate::model::player::{PLAYER_COUNT, PlayerPosition};
use crate::model::suit::Suit;
use crate::model::trick::{Play, TrickError};

/// Cards in `hand` that may be played when `lead_suit` is the suit led so far.
///
/// Leading (`None`) or holding no card of the lead suit frees the whole hand.
/// The result keeps hand order and is never empty for a non-empty hand.
pub fn legal_moves(hand: &[Card], lead_suit: Option<Suit>) -> Vec<Card> {
    let Some(suit) = lead_suit else {
        return hand.to_vec();
    };

    let following: Vec<Card> = hand.iter().copied().filter(|c| c.suit == suit).collect();
    if following.is_empty() {
        hand.to_vec()
    } else {
        following
    }
}

pub fn is_legal(hand: &[Card], lead_suit: Option<Suit>, card: Card) -> bool {
    if !hand.contains(&card) {
        return false;
    }
    match lead_suit {
        Some(suit) if card.suit != suit => !hand.iter().any(|c| c.suit == suit),
        _ => true,
    }
}

/// Seat holding the highest lead-suit card of a full trick.
pub fn compute_winner(plays: &[Play], lead_suit: Suit) -> Result<PlayerPosition, TrickError> {
    if plays.len() != PLAYER_COUNT {
        return Err(TrickError::Incomplete { plays: plays.len() });
    }

    let mut winning: Option<&Play> = None;
    for play in plays.iter().filter(|play| play.card.suit == lead_suit) {
        if winning.is_none_or(|best| play.card.beats_same_suit(best.card)) {
            winning = Some(play);
        }
    }
    winning
        .map(|play| play.position)
        .ok_or(TrickError::NoLeadSuitPlay(lead_suit))
}
