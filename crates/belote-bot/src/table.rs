//! Drives a round for a front end: the human seat plays through
//! [`Table::play_human`], automated seats play from [`Table::tick`] once their
//! scheduled delay has elapsed.

use crate::policy::{Policy, PolicyContext, PolicyKind};
use belote_core::game::schedule::{PlayScheduler, PollResult, ScheduledPlay};
use belote_core::model::card::Card;
use belote_core::model::player::{PLAYER_COUNT, PlayerPosition};
use belote_core::model::round::{PlayError, PlayOutcome, RoundState};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub enum SeatControl {
    Human,
    Bot(Box<dyn Policy>),
}

impl SeatControl {
    pub fn is_bot(&self) -> bool {
        matches!(self, SeatControl::Bot(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do: the human is on turn or the round is over.
    Idle,
    Waiting(Duration),
    Played {
        seat: PlayerPosition,
        card: Card,
        outcome: PlayOutcome,
    },
    /// A pending automated play was dropped because the round changed.
    Cancelled(ScheduledPlay),
}

pub struct Table {
    round: RoundState,
    seats: [SeatControl; PLAYER_COUNT],
    scheduler: PlayScheduler,
}

impl Table {
    pub fn new(round: RoundState, seats: [SeatControl; PLAYER_COUNT], delay: Duration) -> Self {
        Self {
            round,
            seats,
            scheduler: PlayScheduler::new(delay),
        }
    }

    /// Human at seat 0, `kind` bots elsewhere. Bot seeds derive from `seed`
    /// so each seat draws its own stream.
    pub fn with_bots(
        round: RoundState,
        kind: PolicyKind,
        seed: Option<u64>,
        delay: Duration,
    ) -> Self {
        let seats = std::array::from_fn(|idx| {
            if idx == PlayerPosition::HUMAN.index() {
                SeatControl::Human
            } else {
                SeatControl::Bot(kind.spawn(seed.map(|s| s.wrapping_add(idx as u64))))
            }
        });
        Self::new(round, seats, delay)
    }

    /// Every seat automated.
    pub fn all_bots(round: RoundState, kind: PolicyKind, seed: Option<u64>) -> Self {
        let seats = std::array::from_fn(|idx| {
            SeatControl::Bot(kind.spawn(seed.map(|s| s.wrapping_add(idx as u64))))
        });
        Self::new(round, seats, Duration::ZERO)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn is_bot(&self, seat: PlayerPosition) -> bool {
        self.seats[seat.index()].is_bot()
    }

    pub fn pending(&self) -> Option<ScheduledPlay> {
        self.scheduler.pending()
    }

    pub fn play_human(&mut self, card: Card) -> Result<PlayOutcome, PlayError> {
        let outcome = self.round.play_card(PlayerPosition::HUMAN, card)?;
        self.log_outcome(PlayerPosition::HUMAN, card, outcome);
        Ok(outcome)
    }

    /// Fires, arms or drops the automated play for the seat on turn.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, PlayError> {
        match self.scheduler.poll(&self.round, now) {
            PollResult::Stale(stale) => {
                debug!(
                    target: "belote_bot::table",
                    seat = %stale.seat,
                    armed_version = stale.version,
                    version = self.round.version(),
                    "dropping stale automated play"
                );
                Ok(TickOutcome::Cancelled(stale))
            }
            PollResult::Waiting(remaining) => Ok(TickOutcome::Waiting(remaining)),
            PollResult::Ready(ready) => self.play_bot(ready.seat),
            PollResult::Idle => {
                let seats = &self.seats;
                let armed = self
                    .scheduler
                    .arm(&self.round, now, |seat| seats[seat.index()].is_bot());
                match armed {
                    Some(armed) if armed.due <= now => {
                        self.scheduler.cancel();
                        self.play_bot(armed.seat)
                    }
                    Some(armed) => Ok(TickOutcome::Waiting(armed.due - now)),
                    None => Ok(TickOutcome::Idle),
                }
            }
        }
    }

    /// Plays automated seats back to back with no delay until the human is on
    /// turn or the round ends. Returns the number of cards played.
    pub fn run_bots(&mut self) -> Result<usize, PlayError> {
        self.scheduler.cancel();
        let mut plays = 0;
        while !self.round.is_terminal() && self.is_bot(self.round.current_player()) {
            match self.play_bot(self.round.current_player())? {
                TickOutcome::Played { .. } => plays += 1,
                _ => break,
            }
        }
        Ok(plays)
    }

    /// Swaps in a new round, cancelling any automated play armed against the
    /// old one.
    pub fn reset(&mut self, round: RoundState) -> Option<ScheduledPlay> {
        let cancelled = self.scheduler.cancel();
        if let Some(play) = cancelled {
            debug!(
                target: "belote_bot::table",
                seat = %play.seat,
                armed_version = play.version,
                "cancelled automated play on reset"
            );
        }
        self.round = round;
        cancelled
    }

    fn play_bot(&mut self, seat: PlayerPosition) -> Result<TickOutcome, PlayError> {
        if seat != self.round.current_player() {
            return Ok(TickOutcome::Idle);
        }
        let SeatControl::Bot(policy) = &mut self.seats[seat.index()] else {
            return Ok(TickOutcome::Idle);
        };

        let ctx = PolicyContext::for_current(&self.round);
        let Some(card) = policy.choose_play(&ctx) else {
            return Ok(TickOutcome::Idle);
        };

        let outcome = self.round.play_card(seat, card)?;
        self.log_outcome(seat, card, outcome);
        Ok(TickOutcome::Played {
            seat,
            card,
            outcome,
        })
    }

    fn log_outcome(&self, seat: PlayerPosition, card: Card, outcome: PlayOutcome) {
        match outcome {
            PlayOutcome::Played { next } => {
                debug!(
                    target: "belote_bot::table",
                    seat = %seat,
                    card = %card,
                    next = %next,
                    "card played"
                );
            }
            PlayOutcome::TrickCompleted {
                winner,
                round_complete,
            } => {
                debug!(
                    target: "belote_bot::table",
                    seat = %seat,
                    card = %card,
                    winner = %winner,
                    tricks = self.round.tricks_completed(),
                    "trick completed"
                );
                if round_complete {
                    info!(
                        target: "belote_bot::table",
                        tricks_won = ?self.round.tricks_won(),
                        "round complete"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SeatControl, Table, TickOutcome};
    use crate::policy::{FirstLegalPolicy, PolicyKind};
    use belote_core::model::player::PlayerPosition;
    use belote_core::model::round::{PlayError, RoundState};
    use std::time::{Duration, Instant};

    fn human_first_card(table: &Table) -> belote_core::model::card::Card {
        table.round().human_legal_moves()[0]
    }

    #[test]
    fn tick_is_idle_on_human_turn() {
        let mut table = Table::with_bots(
            RoundState::with_seed(1),
            PolicyKind::Random,
            Some(7),
            Duration::from_millis(500),
        );
        assert_eq!(table.tick(Instant::now()), Ok(TickOutcome::Idle));
        assert!(table.pending().is_none());
    }

    #[test]
    fn bot_plays_only_after_delay() {
        let mut table = Table::with_bots(
            RoundState::with_seed(1),
            PolicyKind::Random,
            Some(7),
            Duration::from_millis(500),
        );
        let card = human_first_card(&table);
        table.play_human(card).unwrap();

        let start = Instant::now();
        assert_eq!(
            table.tick(start),
            Ok(TickOutcome::Waiting(Duration::from_millis(500)))
        );
        assert_eq!(table.round().current_player(), PlayerPosition::East);

        match table.tick(start + Duration::from_millis(500)) {
            Ok(TickOutcome::Played { seat, .. }) => assert_eq!(seat, PlayerPosition::East),
            other => panic!("expected East to play, got {other:?}"),
        }
        assert_eq!(table.round().current_player(), PlayerPosition::South);
    }

    #[test]
    fn reset_cancels_pending_play() {
        let mut table = Table::with_bots(
            RoundState::with_seed(2),
            PolicyKind::Random,
            Some(3),
            Duration::from_millis(500),
        );
        let card = human_first_card(&table);
        table.play_human(card).unwrap();
        let start = Instant::now();
        table.tick(start).unwrap();
        let pending = table.pending().expect("bot play armed");

        let fresh = RoundState::with_seed(99);
        assert_eq!(table.reset(fresh.clone()), Some(pending));
        assert_eq!(
            table.tick(start + Duration::from_secs(5)),
            Ok(TickOutcome::Idle)
        );
        assert_eq!(table.round(), &fresh);
    }

    #[test]
    fn human_play_out_of_turn_is_rejected() {
        let mut table = Table::with_bots(
            RoundState::with_seed(4),
            PolicyKind::FirstLegal,
            None,
            Duration::ZERO,
        );
        let card = human_first_card(&table);
        table.play_human(card).unwrap();
        let next = table.round().hand(PlayerPosition::North).cards()[0];
        assert!(matches!(
            table.play_human(next),
            Err(PlayError::OutOfTurn { .. })
        ));
    }

    #[test]
    fn zero_delay_bots_catch_up_to_human() {
        let mut table = Table::with_bots(
            RoundState::with_seed(8),
            PolicyKind::Random,
            Some(11),
            Duration::ZERO,
        );
        while !table.round().is_terminal() {
            if table.round().current_player() == PlayerPosition::HUMAN {
                let card = human_first_card(&table);
                table.play_human(card).unwrap();
            } else {
                let played = table.run_bots().unwrap();
                assert!(played > 0);
            }
        }
        assert_eq!(table.round().tricks_completed(), 8);
        assert_eq!(table.tick(Instant::now()), Ok(TickOutcome::Idle));
    }

    #[test]
    fn all_bot_table_finishes_round() {
        let seats = [
            SeatControl::Bot(Box::new(FirstLegalPolicy)),
            SeatControl::Bot(Box::new(FirstLegalPolicy)),
            SeatControl::Bot(Box::new(FirstLegalPolicy)),
            SeatControl::Bot(Box::new(FirstLegalPolicy)),
        ];
        let mut table = Table::new(RoundState::with_seed(21), seats, Duration::ZERO);
        assert_eq!(table.run_bots(), Ok(32));
        assert!(table.round().is_terminal());

        let mut random = Table::all_bots(RoundState::with_seed(21), PolicyKind::Random, Some(1));
        let now = Instant::now();
        let mut plays = 0;
        while !random.round().is_terminal() {
            if let TickOutcome::Played { .. } = random.tick(now).unwrap() {
                plays += 1;
            }
        }
        assert_eq!(plays, 32);
    }
}
