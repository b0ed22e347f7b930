//! Batch match statistics
//!
//! Tracks game outcomes between a smart bot and a random bot, plies played
//! and wall-clock time.

use std::time::{Duration, Instant};

use crate::engine::GameStatus;
use crate::piece::Color;

#[derive(Debug, Default, Clone)]
pub struct MatchStats {
    /// Games finished
    pub games: u32,

    /// Games won by the smart bot
    pub smart_wins: u32,

    /// Games won by the random bot
    pub random_wins: u32,

    /// Games drawn
    pub draws: u32,

    /// Sequences played over all games
    pub plies: u64,

    /// Start of the run
    pub start_time: Option<Instant>,

    /// Time spent playing
    pub elapsed: Duration,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = start.elapsed();
        }
    }

    /// Count one finished game. `smart` is the color the smart bot played.
    pub fn record(&mut self, status: GameStatus, smart: Color, plies: u64) {
        self.games += 1;
        self.plies += plies;
        match status {
            GameStatus::Win(winner) if winner == smart => self.smart_wins += 1,
            GameStatus::Win(_) => self.random_wins += 1,
            GameStatus::Draw | GameStatus::InProgress => self.draws += 1,
        }
    }

    /// Fraction of games the smart bot won.
    pub fn win_rate(&self) -> f64 {
        ratio(self.smart_wins, self.games)
    }

    pub fn draw_rate(&self) -> f64 {
        ratio(self.draws, self.games)
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.random_wins, self.games)
    }

    pub fn avg_plies(&self) -> f64 {
        if self.games > 0 {
            self.plies as f64 / self.games as f64
        } else {
            0.0
        }
    }

    /// Plain-text report, one figure per line.
    pub fn summary(&self) -> String {
        format!(
            "games: {}\nsmart bot win rate: {:.3}\ndraw rate: {:.3}\nrandom bot win rate: {:.3}\naverage plies: {:.1}\ntime: {} ms\n",
            self.games,
            self.win_rate(),
            self.draw_rate(),
            self.loss_rate(),
            self.avg_plies(),
            self.elapsed.as_millis()
        )
    }

    pub fn print_summary(&self) {
        print!("{}", self.summary());
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_add_up() {
        let mut stats = MatchStats::new();
        stats.record(GameStatus::Win(Color::Red), Color::Red, 30);
        stats.record(GameStatus::Win(Color::Red), Color::Red, 40);
        stats.record(GameStatus::Draw, Color::Red, 50);
        stats.record(GameStatus::Win(Color::Black), Color::Red, 20);
        assert_eq!(stats.games, 4);
        assert_eq!(stats.win_rate(), 0.5);
        assert_eq!(stats.draw_rate(), 0.25);
        assert_eq!(stats.win_rate() + stats.draw_rate() + stats.loss_rate(), 1.0);
        assert_eq!(stats.avg_plies(), 35.0);
    }

    #[test]
    fn test_empty_stats_report_zero() {
        let stats = MatchStats::new();
        assert_eq!(stats.win_rate(), 0.0);
        assert!(stats.summary().starts_with("games: 0\n"));
    }
}
