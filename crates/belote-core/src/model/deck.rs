use crate::model::card::Card;
use crate::model::deal::distribute;
use crate::model::hand::Hand;
use crate::model::player::PLAYER_COUNT;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 32 cards, suit-major then rank-minor.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let standard = Self::standard();
        Self {
            cards: shuffle(&standard.cards, rng),
        }
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    /// Consumes the deck into four hands. A deck always holds a multiple of
    /// four cards, so this cannot fail the way [`crate::model::deal::deal`] can.
    pub fn deal(self) -> [Hand; PLAYER_COUNT] {
        distribute(&self.cards)
    }
}

/// Returns a uniformly random permutation of `items`, leaving the input as is.
///
/// Fisher-Yates from the last index down: each position swaps with a uniform
/// index in `[0, position]`.
pub fn shuffle<T: Clone, R: rand::Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
