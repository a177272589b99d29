use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Card ranks in non-trump playing strength, weakest first.
///
/// The derived ordering is the trick-taking order (`Ten` beats `King`), not
/// the face order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Seven = 0,
    Eight = 1,
    Nine = 2,
    Jack = 3,
    Queen = 4,
    King = 5,
    Ten = 6,
    Ace = 7,
}

impl Rank {
    pub const ORDERED: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ten,
        Rank::Ace,
    ];

    pub const fn from_strength(value: u8) -> Option<Self> {
        match value {
            0 => Some(Rank::Seven),
            1 => Some(Rank::Eight),
            2 => Some(Rank::Nine),
            3 => Some(Rank::Jack),
            4 => Some(Rank::Queen),
            5 => Some(Rank::King),
            6 => Some(Rank::Ten),
            7 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub const fn strength(self) -> u8 {
        self as u8
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ten => "10",
            Rank::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRankError(pub String);

impl fmt::Display for ParseRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rank '{}'", self.0)
    }
}

impl std::error::Error for ParseRankError {}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Rank::ORDERED
            .iter()
            .copied()
            .find(|rank| rank.symbol().eq_ignore_ascii_case(trimmed))
            .or_else(|| trimmed.eq_ignore_ascii_case("T").then_some(Rank::Ten))
            .ok_or_else(|| ParseRankError(s.to_string()))
    }
}
