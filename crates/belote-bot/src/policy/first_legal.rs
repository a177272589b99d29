use super::{Policy, PolicyContext, log_play_decision};
use belote_core::model::card::Card;

/// Deterministic: the first legal card in hand order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalPolicy;

impl Policy for FirstLegalPolicy {
    fn name(&self) -> &'static str {
        "first_legal"
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let legal_moves = ctx.legal_moves();
        let chosen = legal_moves.first().copied()?;
        log_play_decision(ctx, self.name(), &legal_moves, chosen);
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::FirstLegalPolicy;
    use crate::policy::{Policy, PolicyContext};
    use belote_core::model::card::Card;
    use belote_core::model::hand::Hand;
    use belote_core::model::player::PlayerPosition;
    use belote_core::model::rank::Rank;
    use belote_core::model::round::RoundState;
    use belote_core::model::suit::Suit;

    #[test]
    fn follows_suit_with_first_matching_card() {
        let hand = |cards: [(Rank, Suit); 3]| {
            Hand::with_cards(cards.iter().map(|&(r, s)| Card::new(r, s)).collect())
        };
        let hands = [
            hand([
                (Rank::Nine, Suit::Clubs),
                (Rank::Jack, Suit::Hearts),
                (Rank::Queen, Suit::Hearts),
            ]),
            hand([
                (Rank::Ace, Suit::Hearts),
                (Rank::Eight, Suit::Clubs),
                (Rank::Ten, Suit::Clubs),
            ]),
            hand([
                (Rank::Seven, Suit::Diamonds),
                (Rank::Eight, Suit::Diamonds),
                (Rank::Nine, Suit::Diamonds),
            ]),
            hand([
                (Rank::Seven, Suit::Spades),
                (Rank::Eight, Suit::Spades),
                (Rank::Nine, Suit::Spades),
            ]),
        ];
        let mut round = RoundState::from_hands(hands, PlayerPosition::North).unwrap();
        round
            .play_card(PlayerPosition::North, Card::new(Rank::Nine, Suit::Clubs))
            .unwrap();

        let ctx = PolicyContext::for_current(&round);
        assert_eq!(ctx.seat, PlayerPosition::East);
        assert_eq!(
            FirstLegalPolicy.choose_play(&ctx),
            Some(Card::new(Rank::Eight, Suit::Clubs))
        );
    }

    #[test]
    fn empty_hand_yields_nothing() {
        let hands = [Hand::new(), Hand::new(), Hand::new(), Hand::new()];
        let round = RoundState::from_hands(hands, PlayerPosition::East).unwrap();
        let ctx = PolicyContext::for_current(&round);
        assert_eq!(FirstLegalPolicy.choose_play(&ctx), None);
    }
}
