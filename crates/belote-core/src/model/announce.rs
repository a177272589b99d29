use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Announcement {
    Belote,
    /// "All Koz": every suit is trump. Informational only.
    AllKoz,
    /// "Without Koz": no trump suit. Informational only.
    WithoutKoz,
}

impl Announcement {
    pub const ALL: [Announcement; 3] = [
        Announcement::Belote,
        Announcement::AllKoz,
        Announcement::WithoutKoz,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Announcement::Belote => "Belote",
            Announcement::AllKoz => "All Koz",
            Announcement::WithoutKoz => "Without Koz",
        }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnnouncementError(pub String);

impl fmt::Display for ParseAnnouncementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown announcement '{}'", self.0)
    }
}

impl std::error::Error for ParseAnnouncementError {}

impl FromStr for Announcement {
    type Err = ParseAnnouncementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "belote" => Ok(Announcement::Belote),
            "allkoz" | "alltrump" | "alltrumps" => Ok(Announcement::AllKoz),
            "withoutkoz" | "notrump" | "notrumps" => Ok(Announcement::WithoutKoz),
            _ => Err(ParseAnnouncementError(s.to_string())),
        }
    }
}

/// Result of checking one announcement against a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementReport {
    pub kind: Announcement,
    pub trump: Suit,
    pub holds: bool,
}

impl fmt::Display for AnnouncementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.holds) {
            (Announcement::Belote, true) => write!(f, "Belote in {}!", self.trump),
            (Announcement::Belote, false) => write!(f, "No belote in {}.", self.trump),
            (Announcement::AllKoz, _) => write!(f, "All Koz in {}!", self.trump),
            (Announcement::WithoutKoz, _) => f.write_str("Without Koz!"),
        }
    }
}

/// King and Queen of the trump suit.
pub fn has_belote(hand: &Hand, trump: Suit) -> bool {
    hand.holds(Rank::King, trump) && hand.holds(Rank::Queen, trump)
}

/// Only `Belote` depends on the hand; the Koz labels always hold.
pub fn evaluate_announcement(hand: &Hand, trump: Suit, kind: Announcement) -> AnnouncementReport {
    let holds = match kind {
        Announcement::Belote => has_belote(hand, trump),
        Announcement::AllKoz | Announcement::WithoutKoz => true,
    };
    AnnouncementReport { kind, trump, holds }
}

#[cfg(test)]
mod tests {
    use super::{Announcement, evaluate_announcement, has_belote};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn hand(cards: &[(Rank, Suit)]) -> Hand {
        Hand::with_cards(cards.iter().map(|&(r, s)| Card::new(r, s)).collect())
    }

    #[test]
    fn belote_requires_king_and_queen_of_trump() {
        let full = hand(&[(Rank::King, Suit::Spades), (Rank::Queen, Suit::Spades)]);
        let king_only = hand(&[(Rank::King, Suit::Spades), (Rank::Queen, Suit::Hearts)]);
        assert!(has_belote(&full, Suit::Spades));
        assert!(!has_belote(&full, Suit::Hearts));
        assert!(!has_belote(&king_only, Suit::Spades));
    }

    #[test]
    fn belote_messages() {
        let full = hand(&[
            (Rank::Seven, Suit::Clubs),
            (Rank::King, Suit::Spades),
            (Rank::Queen, Suit::Spades),
        ]);
        let missing = hand(&[(Rank::Queen, Suit::Spades)]);
        assert_eq!(
            evaluate_announcement(&full, Suit::Spades, Announcement::Belote).to_string(),
            "Belote in ♠!"
        );
        assert_eq!(
            evaluate_announcement(&missing, Suit::Spades, Announcement::Belote).to_string(),
            "No belote in ♠."
        );
    }

    #[test]
    fn koz_labels_ignore_hand_contents() {
        let empty = Hand::new();
        let all = evaluate_announcement(&empty, Suit::Hearts, Announcement::AllKoz);
        let without = evaluate_announcement(&empty, Suit::Hearts, Announcement::WithoutKoz);
        assert!(all.holds);
        assert!(without.holds);
        assert_eq!(all.to_string(), "All Koz in ♥!");
        assert_eq!(without.to_string(), "Without Koz!");
    }

    #[test]
    fn parses_labels() {
        assert_eq!("belote".parse::<Announcement>(), Ok(Announcement::Belote));
        assert_eq!("All Koz".parse::<Announcement>(), Ok(Announcement::AllKoz));
        assert_eq!("without-koz".parse::<Announcement>(), Ok(Announcement::WithoutKoz));
        assert!("rebelote".parse::<Announcement>().is_err());
        for kind in Announcement::ALL {
            assert_eq!(kind.label().parse::<Announcement>(), Ok(kind));
        }
    }
}
