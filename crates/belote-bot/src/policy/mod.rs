mod first_legal;
mod random;

pub use first_legal::FirstLegalPolicy;
pub use random::RandomPolicy;

use belote_core::model::card::Card;
use belote_core::model::hand::Hand;
use belote_core::model::player::PlayerPosition;
use belote_core::model::round::RoundState;
use belote_core::model::suit::Suit;
use belote_core::rules;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;
use tracing::{Level, event};

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub lead_suit: Option<Suit>,
    pub round: &'a RoundState,
}

impl<'a> PolicyContext<'a> {
    /// Context for the seat currently on turn.
    pub fn for_current(round: &'a RoundState) -> Self {
        let seat = round.current_player();
        Self {
            seat,
            hand: round.hand(seat),
            lead_suit: round.lead_suit(),
            round,
        }
    }

    pub fn legal_moves(&self) -> Vec<Card> {
        rules::legal_moves(self.hand.cards(), self.lead_suit)
    }
}

/// Card selection for automated seats.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Pick a card from `ctx.legal_moves()`. `None` only when the hand is empty.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;
}

/// Uniform pick among the legal moves of `hand`.
pub fn choose_move<R: rand::Rng + ?Sized>(
    hand: &Hand,
    lead_suit: Option<Suit>,
    rng: &mut R,
) -> Option<Card> {
    rules::legal_moves(hand.cards(), lead_suit).choose(rng).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Random,
    FirstLegal,
}

impl PolicyKind {
    pub fn spawn(self, seed: Option<u64>) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::FirstLegal => Box::new(FirstLegalPolicy),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::FirstLegal => "first_legal",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "default" => Ok(PolicyKind::Random),
            "first_legal" | "first-legal" | "first" => Ok(PolicyKind::FirstLegal),
            other => Err(format!("unknown policy '{other}'")),
        }
    }
}

pub(crate) fn log_play_decision(
    ctx: &PolicyContext,
    policy: &'static str,
    legal_moves: &[Card],
    chosen: Card,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = legal_moves
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "belote_bot::play",
        Level::DEBUG,
        seat = %ctx.seat,
        policy,
        legal_count = legal_moves.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        lead_suit = ?ctx.lead_suit,
        trick_cards = ctx.round.current_trick().plays().len(),
        version = ctx.round.version(),
    );
}

#[cfg(test)]
mod tests {
    use super::{PolicyContext, PolicyKind, choose_move};
    use belote_core::model::card::Card;
    use belote_core::model::hand::Hand;
    use belote_core::model::rank::Rank;
    use belote_core::model::round::RoundState;
    use belote_core::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn choose_move_stays_within_legal_set() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Seven, Suit::Spades),
            Card::new(Rank::Ten, Suit::Hearts),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let card = choose_move(&hand, Some(Suit::Hearts), &mut rng).unwrap();
            assert_eq!(card.suit, Suit::Hearts);
            seen.insert(card);
        }
        assert_eq!(seen.len(), 2, "both hearts should come up");
        assert_eq!(choose_move(&Hand::new(), None, &mut rng), None);
    }

    #[test]
    fn context_for_current_seat() {
        let round = RoundState::with_seed(3);
        let ctx = PolicyContext::for_current(&round);
        assert_eq!(ctx.seat, round.current_player());
        assert_eq!(ctx.lead_suit, None);
        assert_eq!(ctx.legal_moves().len(), 8);
    }

    #[test]
    fn policy_kind_parses_and_spawns() {
        assert_eq!("random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert_eq!("First-Legal".parse::<PolicyKind>(), Ok(PolicyKind::FirstLegal));
        assert!("minimax".parse::<PolicyKind>().is_err());
        assert_eq!(PolicyKind::FirstLegal.spawn(None).name(), "first_legal");
        assert_eq!(PolicyKind::Random.spawn(Some(4)).name(), "random");
        assert_eq!(PolicyKind::default(), PolicyKind::Random);
    }
}
