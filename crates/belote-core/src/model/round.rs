use crate::model::card::Card;
use crate::model::deal::{DealError, check_hands};
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::{PLAYER_COUNT, PlayerPosition};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use crate::rules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One deal played trick by trick until the human seat runs out of cards.
///
/// Every successful transition bumps [`RoundState::version`]; rejected plays
/// leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    hands: [Hand; PLAYER_COUNT],
    current_player: PlayerPosition,
    current_trick: Trick,
    trick_history: Vec<CompletedTrick>,
    terminal: bool,
    version: u64,
    deal_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: PlayerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingPlay(PlayerPosition),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play { seat: PlayerPosition, card: Card },
}

/// Builds, shuffles and deals a fresh round.
pub fn init_round<R: rand::Rng + ?Sized>(rng: &mut R) -> RoundState {
    RoundState::deal(Deck::shuffled(rng))
}

impl RoundState {
    pub fn deal(deck: Deck) -> Self {
        Self::start(deck.deal(), PlayerPosition::HUMAN)
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        init_round(&mut rng)
    }

    /// Starts a round from explicit hands, `leader` to play first. The hands
    /// must be equal in size and disjoint.
    pub fn from_hands(
        hands: [Hand; PLAYER_COUNT],
        leader: PlayerPosition,
    ) -> Result<Self, DealError> {
        check_hands(&hands)?;
        Ok(Self::start(hands, leader))
    }

    fn start(hands: [Hand; PLAYER_COUNT], leader: PlayerPosition) -> Self {
        let terminal = hands[PlayerPosition::HUMAN.index()].is_empty();
        let deal_id = deal_fingerprint(&hands, leader);
        Self {
            hands,
            current_player: leader,
            current_trick: Trick::new(leader),
            trick_history: Vec::new(),
            terminal,
            version: 0,
            deal_id,
        }
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; PLAYER_COUNT] {
        &self.hands
    }

    pub fn current_player(&self) -> PlayerPosition {
        self.current_player
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.current_trick.lead_suit()
    }

    pub fn completed_tricks(&self) -> &[CompletedTrick] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn tricks_won(&self) -> [u8; PLAYER_COUNT] {
        let mut counts = [0u8; PLAYER_COUNT];
        for completed in &self.trick_history {
            let idx = completed.winner.index();
            counts[idx] = counts[idx].saturating_add(1);
        }
        counts
    }

    pub fn cards_remaining(&self) -> usize {
        self.hands.iter().map(Hand::len).sum()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identifies the deal this round started from; fixed for the life of
    /// the round. Together with [`RoundState::version`] it pins one state.
    pub fn deal_id(&self) -> u64 {
        self.deal_id
    }

    pub fn phase(&self) -> RoundPhase {
        if self.terminal {
            RoundPhase::Complete
        } else {
            RoundPhase::AwaitingPlay(self.current_player)
        }
    }

    /// Cards `seat` could play against the current lead suit.
    pub fn legal_moves(&self, seat: PlayerPosition) -> Vec<Card> {
        rules::legal_moves(self.hand(seat).cards(), self.lead_suit())
    }

    /// Legal cards for the human seat, empty while another seat is to move.
    pub fn human_legal_moves(&self) -> Vec<Card> {
        if self.terminal || self.current_player != PlayerPosition::HUMAN {
            return Vec::new();
        }
        self.legal_moves(PlayerPosition::HUMAN)
    }

    /// Reducer form of [`RoundState::play_card`]: `self` is left as it was.
    pub fn apply(&self, action: Action) -> Result<(RoundState, PlayOutcome), PlayError> {
        let mut next = self.clone();
        let outcome = match action {
            Action::Play { seat, card } => next.play_card(seat, card)?,
        };
        Ok((next, outcome))
    }

    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        if self.terminal {
            return Err(PlayError::RoundComplete);
        }

        if seat != self.current_player {
            return Err(PlayError::OutOfTurn {
                expected: self.current_player,
                actual: seat,
            });
        }

        let hand = &self.hands[seat.index()];
        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        if let Some(suit) = self.lead_suit()
            && card.suit != suit
            && hand.has_suit(suit)
        {
            return Err(PlayError::MustFollowSuit(suit));
        }

        // Stage the trick so a failure here cannot leave a half-applied play.
        let mut trick = self.current_trick.clone();
        trick.play(seat, card).map_err(PlayError::Trick)?;
        let winner = if trick.is_complete() {
            Some(trick.winner().map_err(PlayError::Trick)?)
        } else {
            None
        };

        self.hands[seat.index()].remove(card);
        self.version += 1;

        let Some(winner) = winner else {
            self.current_trick = trick;
            self.current_player = seat.next();
            return Ok(PlayOutcome::Played {
                next: self.current_player,
            });
        };

        self.trick_history.push(CompletedTrick { trick, winner });
        self.current_trick = Trick::new(winner);
        self.current_player = winner;
        if self.hands[PlayerPosition::HUMAN.index()].is_empty() {
            self.terminal = true;
        }

        Ok(PlayOutcome::TrickCompleted {
            winner,
            round_complete: self.terminal,
        })
    }
}

fn deal_fingerprint(hands: &[Hand; PLAYER_COUNT], leader: PlayerPosition) -> u64 {
    let mut hasher = DefaultHasher::new();
    leader.hash(&mut hasher);
    for hand in hands {
        hand.cards().hash(&mut hasher);
    }
    hasher.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { next: PlayerPosition },
    TrickCompleted {
        winner: PlayerPosition,
        round_complete: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    RoundComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    CardNotInHand(Card),
    MustFollowSuit(Suit),
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::RoundComplete => write!(f, "round is over"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "{actual} played out of turn; waiting on {expected}")
            }
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {suit}"),
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Trick(err) => Some(err),
            _ => None,
        }
    }
}
