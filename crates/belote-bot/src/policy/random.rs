use super::{Policy, PolicyContext, log_play_decision};
use belote_core::model::card::Card;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Plays a uniformly random legal card. No look-ahead, no hand evaluation.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub const NAME: &'static str = "random";

    /// `Some(seed)` makes the choices reproducible; `None` draws from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let legal_moves = ctx.legal_moves();
        let chosen = legal_moves.choose(&mut self.rng).copied()?;
        log_play_decision(ctx, Self::NAME, &legal_moves, chosen);
        Some(chosen)
    }
}
