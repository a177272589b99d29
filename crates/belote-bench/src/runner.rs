use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use belote_bot::{SeatControl, Table};
use belote_core::model::announce::has_belote;
use belote_core::model::player::{PLAYER_COUNT, PlayerPosition};
use belote_core::model::round::{PlayError, RoundState};
use belote_core::model::suit::Suit;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchmarkConfig, ResolvedOutputs};
use crate::summary::{SummaryCollector, SummaryError};

const TRICKS_PER_ROUND: usize = 8;

/// Plays the configured number of all-bot rounds and writes one JSONL row
/// per round.
pub struct BenchRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
}

pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Result of one finished round, seat-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub tricks_won: [u8; PLAYER_COUNT],
    pub trick_winners: Vec<usize>,
    /// Suits in which each seat was dealt both king and queen.
    pub belote_suits: [Vec<Suit>; PLAYER_COUNT],
}

#[derive(Debug, Serialize)]
struct RoundLogRow<'a> {
    run_id: &'a str,
    round_index: usize,
    deal_seed: u64,
    seats: Vec<&'a str>,
    tricks_won: [u8; PLAYER_COUNT],
    team_tricks: [u8; 2],
    trick_winners: &'a [usize],
    belote: Vec<Vec<String>>,
}

impl BenchRunner {
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != PLAYER_COUNT {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }
        Ok(Self { config, outputs })
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut collector = SummaryCollector::new(&self.config);
        let mut rows_written = 0usize;

        event!(
            target: "belote_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            rounds = self.config.deals.rounds,
            seed = ?self.config.deals.seed,
            "bench run started"
        );

        for round_index in 0..self.config.deals.rounds {
            let deal_seed = rng.next_u64();
            let outcome = self.play_round(deal_seed)?;
            collector.record_round(&outcome);
            self.write_row(&mut writer, round_index, deal_seed, &outcome)?;
            rows_written += 1;

            event!(
                target: "belote_bench::round",
                Level::INFO,
                run_id = %self.config.run_id,
                round_index = round_index as u32,
                deal_seed,
                tricks_won = ?outcome.tricks_won,
            );
        }

        writer.flush()?;
        collector.finish().write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            rounds_played: self.config.deals.rounds,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    /// Deals from `deal_seed` and lets every seat's policy play it out.
    pub fn play_round(&self, deal_seed: u64) -> Result<RoundOutcome, RunnerError> {
        let round = RoundState::with_seed(deal_seed);
        let belote_suits = std::array::from_fn(|idx| {
            let hand = &round.hands()[idx];
            Suit::ALL
                .into_iter()
                .filter(|&suit| has_belote(hand, suit))
                .collect()
        });

        let seats = std::array::from_fn(|idx| {
            let seat = &self.config.seats[idx];
            let seed = seat.seed.unwrap_or(deal_seed.wrapping_add(idx as u64));
            SeatControl::Bot(seat.kind.policy().spawn(Some(seed)))
        });
        let mut table = Table::new(round, seats, Duration::ZERO);
        table.run_bots()?;

        let round = table.round();
        if !round.is_terminal() || round.tricks_completed() != TRICKS_PER_ROUND {
            return Err(RunnerError::Unfinished {
                tricks: round.tricks_completed(),
            });
        }

        Ok(RoundOutcome {
            tricks_won: round.tricks_won(),
            trick_winners: round
                .completed_tricks()
                .iter()
                .map(|completed| completed.winner.index())
                .collect(),
            belote_suits,
        })
    }

    fn write_row(
        &self,
        writer: &mut BufWriter<File>,
        round_index: usize,
        deal_seed: u64,
        outcome: &RoundOutcome,
    ) -> Result<(), RunnerError> {
        let row = RoundLogRow {
            run_id: &self.config.run_id,
            round_index,
            deal_seed,
            seats: self.config.seats.iter().map(|s| s.name.as_str()).collect(),
            tricks_won: outcome.tricks_won,
            team_tricks: team_tricks(&outcome.tricks_won),
            trick_winners: &outcome.trick_winners,
            belote: outcome
                .belote_suits
                .iter()
                .map(|suits| suits.iter().map(|suit| suit.to_string()).collect())
                .collect(),
        };
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Partnership totals: seats 0 and 2 against seats 1 and 3.
pub fn team_tricks(tricks_won: &[u8; PLAYER_COUNT]) -> [u8; 2] {
    let mut teams = [0u8; 2];
    for seat in PlayerPosition::LOOP {
        teams[seat.index() % 2] += tricks_won[seat.index()];
    }
    teams
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("expected {PLAYER_COUNT} seats, found {found}")]
    SeatCount { found: usize },
    #[error("round stopped after {tricks} tricks")]
    Unfinished { tricks: usize },
    #[error("illegal play: {0}")]
    Play(#[from] PlayError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
