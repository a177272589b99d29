use crate::model::rank::{ParseRankError, Rank};
use crate::model::suit::{ParseSuitError, Suit};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn beats_same_suit(self, other: Card) -> bool {
        self.suit == other.suit && self.rank > other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    Empty,
    Rank(ParseRankError),
    Suit(ParseSuitError),
}

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCardError::Empty => write!(f, "card text is empty"),
            ParseCardError::Rank(err) => write!(f, "{err}"),
            ParseCardError::Suit(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseCardError {}

/// Parses `<rank><suit>` such as `10♥`, `QS` or `7c`.
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (split, _) = trimmed.char_indices().last().ok_or(ParseCardError::Empty)?;
        let (rank, suit) = trimmed.split_at(split);
        let rank = rank.parse::<Rank>().map_err(ParseCardError::Rank)?;
        let suit = suit.parse::<Suit>().map_err(ParseCardError::Suit)?;
        Ok(Card::new(rank, suit))
    }
}
