use std::fs;
use std::path::Path;

use belote_core::model::player::{PLAYER_COUNT, PlayerPosition};
use thiserror::Error;

use crate::config::{BenchmarkConfig, SeatKind};
use crate::runner::{RoundOutcome, team_tricks};

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-seat and per-team totals across rounds.
pub struct SummaryCollector {
    run_id: String,
    seats: Vec<SeatTotals>,
    team_tricks: [u64; 2],
    team_rounds_won: [usize; 2],
    rounds: usize,
}

struct SeatTotals {
    name: String,
    kind: SeatKind,
    tricks: u64,
    best_rounds: usize,
    belotes: usize,
}

impl SummaryCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            seats: config
                .seats
                .iter()
                .map(|seat| SeatTotals {
                    name: seat.name.clone(),
                    kind: seat.kind,
                    tricks: 0,
                    best_rounds: 0,
                    belotes: 0,
                })
                .collect(),
            team_tricks: [0; 2],
            team_rounds_won: [0; 2],
            rounds: 0,
        }
    }

    pub fn record_round(&mut self, outcome: &RoundOutcome) {
        self.rounds += 1;
        let most = outcome.tricks_won.iter().copied().max().unwrap_or(0);
        for (seat, totals) in self.seats.iter_mut().enumerate() {
            let won = outcome.tricks_won[seat];
            totals.tricks += u64::from(won);
            if won == most {
                totals.best_rounds += 1;
            }
            totals.belotes += outcome.belote_suits[seat].len();
        }

        let teams = team_tricks(&outcome.tricks_won);
        for (team, &won) in teams.iter().enumerate() {
            self.team_tricks[team] += u64::from(won);
        }
        // Four tricks each is a split and counts for neither team.
        if teams[0] != teams[1] {
            let winner = if teams[0] > teams[1] { 0 } else { 1 };
            self.team_rounds_won[winner] += 1;
        }
    }

    pub fn finish(self) -> BenchSummary {
        let rounds = self.rounds;
        let per_round = |total: u64| {
            if rounds == 0 {
                0.0
            } else {
                total as f64 / rounds as f64
            }
        };

        let seats = self
            .seats
            .iter()
            .enumerate()
            .map(|(idx, totals)| SeatReport {
                seat: PlayerPosition::from_index(idx).map_or("?", PlayerPosition::label),
                name: totals.name.clone(),
                kind: totals.kind,
                tricks: totals.tricks,
                avg_tricks: per_round(totals.tricks),
                best_rounds: totals.best_rounds,
                belotes: totals.belotes,
            })
            .collect();

        let teams = [("north/south", 0), ("east/west", 1)]
            .into_iter()
            .map(|(label, idx)| TeamReport {
                label,
                tricks: self.team_tricks[idx],
                avg_tricks: per_round(self.team_tricks[idx]),
                rounds_won: self.team_rounds_won[idx],
            })
            .collect();

        BenchSummary {
            run_id: self.run_id,
            rounds,
            seats,
            teams,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatReport {
    pub seat: &'static str,
    pub name: String,
    pub kind: SeatKind,
    pub tricks: u64,
    pub avg_tricks: f64,
    pub best_rounds: usize,
    pub belotes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamReport {
    pub label: &'static str,
    pub tricks: u64,
    pub avg_tricks: f64,
    pub rounds_won: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchSummary {
    pub run_id: String,
    pub rounds: usize,
    pub seats: Vec<SeatReport>,
    pub teams: Vec<TeamReport>,
}

impl BenchSummary {
    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str(&format!("# Bench Summary: {}\n\n", self.run_id));
        rows.push_str(&format!(
            "Rounds played: {} ({} seats)\n\n",
            self.rounds, PLAYER_COUNT
        ));
        rows.push_str("| Seat | Name | Policy | Tricks | Avg tricks/round | Most-tricks rounds | Belotes dealt |\n");
        rows.push_str("|------|------|--------|--------|------------------|--------------------|---------------|\n");
        for seat in &self.seats {
            rows.push_str(&format!(
                "| {seat} | {name} | {kind} | {tricks} | {avg:.3} | {best} | {belotes} |\n",
                seat = seat.seat,
                name = seat.name,
                kind = seat.kind.policy(),
                tricks = seat.tricks,
                avg = seat.avg_tricks,
                best = seat.best_rounds,
                belotes = seat.belotes,
            ));
        }

        rows.push_str("\n| Team | Tricks | Avg tricks/round | Rounds won |\n");
        rows.push_str("|------|--------|------------------|------------|\n");
        for team in &self.teams {
            rows.push_str(&format!(
                "| {} | {} | {:.3} | {} |\n",
                team.label, team.tricks, team.avg_tricks, team.rounds_won
            ));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), SummaryError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| SummaryError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DealConfig, LoggingConfig, OutputsConfig, SeatConfig};
    use belote_core::model::suit::Suit;

    fn config() -> BenchmarkConfig {
        BenchmarkConfig {
            run_id: "summary".to_string(),
            deals: DealConfig {
                seed: None,
                rounds: 2,
            },
            seats: ["a", "b", "c", "d"]
                .into_iter()
                .map(|name| SeatConfig {
                    name: name.to_string(),
                    kind: SeatKind::Random,
                    seed: None,
                })
                .collect(),
            outputs: OutputsConfig {
                jsonl: "r.jsonl".to_string(),
                summary_md: "s.md".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    fn outcome(tricks_won: [u8; PLAYER_COUNT]) -> RoundOutcome {
        RoundOutcome {
            tricks_won,
            trick_winners: Vec::new(),
            belote_suits: [vec![Suit::Spades], Vec::new(), Vec::new(), Vec::new()],
        }
    }

    #[test]
    fn totals_accumulate_per_seat_and_team() {
        let mut collector = SummaryCollector::new(&config());
        collector.record_round(&outcome([3, 1, 2, 2]));
        collector.record_round(&outcome([2, 2, 2, 2]));
        let summary = collector.finish();

        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.seats[0].seat, "north");
        assert_eq!(summary.seats[0].tricks, 5);
        assert_eq!(summary.seats[0].best_rounds, 2);
        assert_eq!(summary.seats[1].best_rounds, 1);
        assert_eq!(summary.seats[0].belotes, 2);
        assert!((summary.seats[0].avg_tricks - 2.5).abs() < f64::EPSILON);

        assert_eq!(summary.teams[0].tricks, 9);
        assert_eq!(summary.teams[1].tricks, 7);
        assert_eq!(summary.teams[0].rounds_won, 1);
        assert_eq!(summary.teams[1].rounds_won, 0);
    }

    #[test]
    fn markdown_lists_every_seat() {
        let mut collector = SummaryCollector::new(&config());
        collector.record_round(&outcome([8, 0, 0, 0]));
        let markdown = collector.finish().to_markdown();
        assert!(markdown.starts_with("# Bench Summary: summary"));
        for name in ["| north | a |", "| east | b |", "| south | c |", "| west | d |"] {
            assert!(markdown.contains(name), "missing row {name}");
        }
        assert!(markdown.contains("| north/south | 8 | 8.000 | 1 |"));
    }

    #[test]
    fn policy_column_uses_config_names() {
        let mut cfg = config();
        cfg.seats[1].kind = SeatKind::FirstLegal;
        let mut collector = SummaryCollector::new(&cfg);
        collector.record_round(&outcome([2, 2, 2, 2]));
        let markdown = collector.finish().to_markdown();
        assert!(markdown.contains("| north | a | random |"));
        assert!(markdown.contains("| east | b | first_legal |"));
        assert!(!markdown.contains("FirstLegal"));
    }
}
