//! Parameter sweeps over repeated UCT-vs-UCT matches.
//!
//! Each cell of the grid pits a plain UCT player (moving second) against a
//! player using a blended heuristic (moving first) and records the mean and
//! population standard deviation of the match outcome codes.

use crate::error::ExperimentError;
use crate::game::connectfour::ConnectFour;
use crate::game::nim::Nim;
use crate::game::othello::Othello;
use crate::game::tictactoe::TicTacToe;
use crate::game::GameState;
use crate::runner::{AIPlayer, MatchOutcome, Runner};
use crate::strategies::uct::{HeuristicKind, SearchParams};
use crate::strategies::UctParams;
use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use tracing::info;

/// Largest take allowed in the single-heap Nim used by experiments.
pub const NIM_MAX_TAKE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum GameKind {
    Nim,
    TicTacToe,
    ConnectFour,
    Othello,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            GameKind::Nim => "nim",
            GameKind::TicTacToe => "tictactoe",
            GameKind::ConnectFour => "connectfour",
            GameKind::Othello => "othello",
        };
        write!(f, "{}", name)
    }
}

impl GameKind {
    /// Checks `param` against what the game accepts: chip count for Nim,
    /// board size for Othello, nothing for the others.
    pub fn check_param(&self, param: Option<u32>) -> Result<(), ExperimentError> {
        let ok = match (*self, param) {
            (GameKind::Nim, Some(chips)) => chips >= 1,
            (GameKind::Othello, Some(size)) => size >= 4 && size % 2 == 0,
            (GameKind::TicTacToe, None) | (GameKind::ConnectFour, None) => true,
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(ExperimentError::InvalidGameParam { game: *self, param })
        }
    }

    /// Label used in result records, e.g. `nim_15`.
    pub fn label(&self, param: Option<u32>) -> String {
        match param {
            Some(p) => format!("{}_{}", self, p),
            None => self.to_string(),
        }
    }
}

/// Plays one match of `kind` between two players.
pub fn play_match(
    kind: GameKind,
    param: Option<u32>,
    p1: &mut AIPlayer,
    p2: &mut AIPlayer,
) -> Result<MatchOutcome, ExperimentError> {
    kind.check_param(param)?;
    let outcome = match (kind, param) {
        (GameKind::Nim, Some(chips)) => run(Nim::subtraction(chips, NIM_MAX_TAKE), p1, p2)?,
        (GameKind::Othello, Some(size)) => run(Othello::new(size as usize), p1, p2)?,
        (GameKind::TicTacToe, _) => run(TicTacToe::new(), p1, p2)?,
        (GameKind::ConnectFour, _) => run(ConnectFour::new(), p1, p2)?,
        _ => return Err(ExperimentError::InvalidGameParam { game: kind, param }),
    };
    Ok(outcome)
}

fn run<G>(board: G, p1: &mut AIPlayer, p2: &mut AIPlayer) -> Result<MatchOutcome, ExperimentError>
where
    G: GameState + fmt::Display,
{
    Ok(Runner::new(board, p1, p2).run()?)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameGrid {
    pub game: GameKind,
    /// Parameters to sweep. Empty means the game runs once without one.
    #[serde(default)]
    pub params: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationPair {
    /// Budget of the plain UCT player, who moves second.
    pub plain: u32,
    /// Budget of the blended player, who moves first.
    pub blended: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub games: Vec<GameGrid>,
    pub blend_weights: Vec<f64>,
    pub heuristics: Vec<HeuristicKind>,
    pub iterations: Vec<IterationPair>,
    pub matches: u32,
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let grid = |game, params: &[u32]| GameGrid {
            game,
            params: params.to_vec(),
        };
        let pair = |plain, blended| IterationPair { plain, blended };
        ExperimentConfig {
            games: vec![
                grid(GameKind::Nim, &[15, 50, 100, 150, 1000]),
                grid(GameKind::ConnectFour, &[]),
                grid(GameKind::TicTacToe, &[]),
                grid(GameKind::Othello, &[4, 8]),
            ],
            blend_weights: vec![0.5, 0.2, 0.1, 0.05, 0.03, 0.01, 0.0],
            heuristics: vec![HeuristicKind::StdDev, HeuristicKind::LastOutcome],
            iterations: vec![pair(15, 15), pair(25, 50), pair(50, 25), pair(100, 200)],
            matches: 100,
            seed: 0,
        }
    }
}

/// One point of the sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub game: GameKind,
    pub param: Option<u32>,
    pub blend_weight: f64,
    pub heuristic: HeuristicKind,
    pub iterations: IterationPair,
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.matches == 0 {
            return Err(ExperimentError::InvalidConfig("matches must be at least 1".into()));
        }
        for grid in &self.games {
            if grid.params.is_empty() {
                grid.game.check_param(None)?;
            }
            for &p in &grid.params {
                grid.game.check_param(Some(p))?;
            }
        }
        for &w in &self.blend_weights {
            SearchParams {
                blend_weight: w,
                ..SearchParams::with_iterations(1)
            }
            .validate()?;
        }
        for pair in &self.iterations {
            SearchParams::with_iterations(pair.plain).validate()?;
            SearchParams::with_iterations(pair.blended).validate()?;
        }
        Ok(())
    }

    /// All cells in sweep order: game, blend weight, heuristic, iteration
    /// pair, then game parameter.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for grid in &self.games {
            let params: Vec<Option<u32>> = if grid.params.is_empty() {
                vec![None]
            } else {
                grid.params.iter().map(|&p| Some(p)).collect()
            };
            for &blend_weight in &self.blend_weights {
                for &heuristic in &self.heuristics {
                    for &iterations in &self.iterations {
                        for &param in &params {
                            cells.push(Cell {
                                game: grid.game,
                                param,
                                blend_weight,
                                heuristic,
                                iterations,
                            });
                        }
                    }
                }
            }
        }
        cells
    }
}

/// Aggregated outcome of one cell, written as one JSON line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub game: String,
    pub blend_weight: f64,
    pub heuristic: HeuristicKind,
    pub plain_iterations: u32,
    pub blended_iterations: u32,
    pub outcomes: Vec<f64>,
    pub mean: f64,
    pub std: f64,
}

/// Mean and population standard deviation.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

fn match_seed(base: u64, cell: usize, game: u32) -> u64 {
    base.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((cell as u64) << 32)
        .wrapping_add(game as u64)
}

/// Plays `matches` games for `cell` in parallel and aggregates them.
pub fn run_cell(cell: &Cell, matches: u32, seed: u64) -> Result<CellRecord, ExperimentError> {
    let outcomes = (0..matches)
        .into_par_iter()
        .map(|i| {
            let s = match_seed(seed, 0, i);
            let mut blended = AIPlayer::new(
                "blended",
                UctParams {
                    search: SearchParams {
                        blend_weight: cell.blend_weight,
                        ..SearchParams::with_iterations(cell.iterations.blended)
                    },
                    heuristic: cell.heuristic,
                    seed: Some(s.wrapping_mul(2)),
                },
            );
            let mut plain = AIPlayer::new(
                "plain",
                UctParams {
                    search: SearchParams::with_iterations(cell.iterations.plain),
                    heuristic: HeuristicKind::Zero,
                    seed: Some(s.wrapping_mul(2).wrapping_add(1)),
                },
            );
            play_match(cell.game, cell.param, &mut blended, &mut plain).map(|o| o.code())
        })
        .collect::<Result<Vec<f64>, ExperimentError>>()?;

    let (mean, std) = mean_std(&outcomes);
    Ok(CellRecord {
        game: cell.game.label(cell.param),
        blend_weight: cell.blend_weight,
        heuristic: cell.heuristic,
        plain_iterations: cell.iterations.plain,
        blended_iterations: cell.iterations.blended,
        outcomes,
        mean,
        std,
    })
}

/// Runs every cell, appending one JSON line per cell to `out` as it finishes.
pub fn run_experiment<W: Write>(config: &ExperimentConfig, out: &mut W) -> Result<Vec<CellRecord>, ExperimentError> {
    config.validate()?;
    let cells = config.cells();
    let mut records = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let record = run_cell(cell, config.matches, match_seed(config.seed, i, 0))?;
        info!(
            cell = i + 1,
            of = cells.len(),
            game = %record.game,
            blend_weight = record.blend_weight,
            heuristic = %record.heuristic,
            mean = record.mean,
            std = record.std,
            "cell finished"
        );
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
        out.flush()?;
        records.push(record);
    }
    Ok(records)
}

pub const CSV_HEADER: &str = "game,blend_weight,heuristic,plain_iterations,blended_iterations,mean,std";

/// Converts a JSON lines log written by [`run_experiment`] into CSV. Blank
/// lines are skipped. Returns the number of rows written.
pub fn write_csv<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<usize, ExperimentError> {
    writeln!(out, "{}", CSV_HEADER)?;
    let mut rows = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let r: CellRecord = serde_json::from_str(&line)?;
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            r.game, r.blend_weight, r.heuristic, r.plain_iterations, r.blended_iterations, r.mean, r.std
        )?;
        rows += 1;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> ExperimentConfig {
        ExperimentConfig {
            games: vec![
                GameGrid {
                    game: GameKind::Nim,
                    params: vec![5, 9],
                },
                GameGrid {
                    game: GameKind::TicTacToe,
                    params: vec![],
                },
            ],
            blend_weights: vec![0.0, 0.5],
            heuristics: vec![HeuristicKind::StdDev],
            iterations: vec![IterationPair { plain: 5, blended: 10 }],
            matches: 4,
            seed: 42,
        }
    }

    #[test]
    fn default_grid_matches_sweep_size() {
        let config = ExperimentConfig::default();
        config.validate().unwrap();
        // (5 + 1 + 1 + 2) games x 7 weights x 2 heuristics x 4 budgets
        assert_eq!(config.cells().len(), 9 * 7 * 2 * 4);
    }

    #[test]
    fn cells_vary_param_fastest() {
        let cells = tiny_config().cells();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].param, Some(5));
        assert_eq!(cells[1].param, Some(9));
        assert_eq!(cells[2].blend_weight, 0.5);
        assert_eq!(cells[4].game, GameKind::TicTacToe);
        assert_eq!(cells[4].param, None);
    }

    #[test]
    fn params_are_checked() {
        assert!(GameKind::Othello.check_param(Some(5)).is_err());
        assert!(GameKind::Othello.check_param(None).is_err());
        assert!(GameKind::Nim.check_param(Some(0)).is_err());
        assert!(GameKind::TicTacToe.check_param(Some(3)).is_err());
        assert!(GameKind::ConnectFour.check_param(None).is_ok());
        let mut config = tiny_config();
        config.blend_weights.push(2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn mean_and_population_std() {
        assert_eq!(mean_std(&[1.0, 2.0]), (1.5, 0.5));
        assert_eq!(mean_std(&[1.5, 1.5, 1.5]), (1.5, 0.0));
        assert_eq!(mean_std(&[]), (0.0, 0.0));
    }

    #[test]
    fn experiment_is_reproducible_and_reportable() {
        let config = tiny_config();
        let mut first = Vec::new();
        let records = run_experiment(&config, &mut first).unwrap();
        let mut second = Vec::new();
        run_experiment(&config, &mut second).unwrap();
        assert_eq!(first, second);

        assert_eq!(records.len(), 6);
        for r in &records {
            assert_eq!(r.outcomes.len(), 4);
            assert!(r.outcomes.iter().all(|&o| o == 1.0 || o == 2.0 || o == 1.5));
            assert!(r.mean >= 1.0 && r.mean <= 2.0);
        }
        assert_eq!(records[0].game, "nim_5");
        assert_eq!(records[5].game, "tictactoe");

        let mut csv = Vec::new();
        let rows = write_csv(first.as_slice(), &mut csv).unwrap();
        assert_eq!(rows, 6);
        let csv = String::from_utf8(csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert!(lines.next().unwrap().starts_with("nim_5,0,std-dev,5,10,"));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"games": [{"game": "othello", "params": [4]}], "matches": 2}"#).unwrap();
        assert_eq!(config.games[0].game, GameKind::Othello);
        assert_eq!(config.matches, 2);
        assert_eq!(config.blend_weights, ExperimentConfig::default().blend_weights);
    }
}
