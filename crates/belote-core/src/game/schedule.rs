use crate::model::player::PlayerPosition;
use crate::model::round::RoundState;
use std::time::{Duration, Instant};

/// An automated play waiting for its delay to elapse.
///
/// It is tied to the deal and version it was armed against and must never
/// be applied to any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledPlay {
    pub seat: PlayerPosition,
    pub deal_id: u64,
    pub version: u64,
    pub due: Instant,
}

impl ScheduledPlay {
    pub fn matches(&self, round: &RoundState) -> bool {
        self.deal_id == round.deal_id() && self.version == round.version()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    Idle,
    Waiting(Duration),
    Ready(ScheduledPlay),
    /// The round moved on before the play fired; it has been dropped.
    Stale(ScheduledPlay),
}

#[derive(Debug, Clone)]
pub struct PlayScheduler {
    delay: Duration,
    pending: Option<ScheduledPlay>,
}

impl PlayScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pending(&self) -> Option<ScheduledPlay> {
        self.pending
    }

    /// Schedules a play for the seat to move when `is_bot` says it is
    /// automated and it still holds cards. A pending play armed against any
    /// other state is replaced.
    pub fn arm<F>(&mut self, round: &RoundState, now: Instant, is_bot: F) -> Option<ScheduledPlay>
    where
        F: Fn(PlayerPosition) -> bool,
    {
        if let Some(pending) = self.pending
            && pending.matches(round)
        {
            return Some(pending);
        }
        self.pending = None;

        if round.is_terminal() {
            return None;
        }
        let seat = round.current_player();
        if !is_bot(seat) || round.hand(seat).is_empty() {
            return None;
        }

        let scheduled = ScheduledPlay {
            seat,
            deal_id: round.deal_id(),
            version: round.version(),
            due: now + self.delay,
        };
        self.pending = Some(scheduled);
        Some(scheduled)
    }

    pub fn poll(&mut self, round: &RoundState, now: Instant) -> PollResult {
        let Some(pending) = self.pending else {
            return PollResult::Idle;
        };

        if !pending.matches(round) || round.is_terminal() {
            self.pending = None;
            return PollResult::Stale(pending);
        }

        if now < pending.due {
            return PollResult::Waiting(pending.due - now);
        }

        self.pending = None;
        PollResult::Ready(pending)
    }

    pub fn cancel(&mut self) -> Option<ScheduledPlay> {
        self.pending.take()
    }
}

impl Default for PlayScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
