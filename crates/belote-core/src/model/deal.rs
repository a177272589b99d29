use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PLAYER_COUNT;
use std::collections::HashSet;
use std::{array, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    UnevenDeck { len: usize },
    /// Hand sizes by seat; every seat must hold the same count.
    UnequalHands {
        sizes: [usize; PLAYER_COUNT],
    },
    DuplicateCard(Card),
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::UnevenDeck { len } => {
                write!(f, "cannot deal {len} cards evenly to {PLAYER_COUNT} players")
            }
            DealError::UnequalHands { sizes } => {
                write!(f, "hands must be the same size, got {sizes:?}")
            }
            DealError::DuplicateCard(card) => write!(f, "{card} is held more than once"),
        }
    }
}

impl std::error::Error for DealError {}

/// Deals round-robin: card `i` goes to seat `i % 4`, keeping deck order
/// inside each hand.
pub fn deal(cards: &[Card]) -> Result<[Hand; PLAYER_COUNT], DealError> {
    if cards.len() % PLAYER_COUNT != 0 {
        return Err(DealError::UnevenDeck { len: cards.len() });
    }

    Ok(distribute(cards))
}

/// Hands handed to a round must be equal in size and share no card.
pub fn check_hands(hands: &[Hand; PLAYER_COUNT]) -> Result<(), DealError> {
    let sizes = array::from_fn(|idx| hands[idx].len());
    if sizes.iter().any(|&len| len != sizes[0]) {
        return Err(DealError::UnequalHands { sizes });
    }

    let mut seen = HashSet::with_capacity(sizes[0] * PLAYER_COUNT);
    for card in hands.iter().flat_map(|hand| hand.iter()) {
        if !seen.insert(*card) {
            return Err(DealError::DuplicateCard(*card));
        }
    }
    Ok(())
}

pub(crate) fn distribute(cards: &[Card]) -> [Hand; PLAYER_COUNT] {
    let mut hands: [Hand; PLAYER_COUNT] = array::from_fn(|_| Hand::new());
    for (index, card) in cards.iter().enumerate() {
        hands[index % PLAYER_COUNT].add(*card);
    }
    hands
}
