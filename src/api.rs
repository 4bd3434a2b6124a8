//! JSON requests and responses shared by the wasm exports and the native
//! binary. Field names follow the side panel's message format.

use crate::board::{Board, BoardLayout};
use crate::candidates::{Candidate, Evaluation, evaluate_candidates, parse_candidates};
use crate::replay::{ReplayRound, replay_plan};
use crate::solver::{self, Limits};
use crate::{ExchangeStep, Solution, Tile, format_compact, parse_tiles};
use serde::{Deserialize, Serialize};

/// Board segments as lists of tile codes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardJson {
    pub hand: Vec<String>,
    #[serde(default)]
    pub dora: Vec<String>,
    pub wall: Vec<String>,
    pub deadwall: Vec<String>,
}

/// Solve result. `take` and `waited` are -1 and `solution` is null when no
/// plan exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionJson {
    pub take: i64,
    pub solution: Option<Vec<Vec<String>>>,
    pub waited: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutJson {
    pub hand_len: usize,
    pub indicator_len: usize,
    pub dead_wall_len: usize,
}

impl Default for LayoutJson {
    fn default() -> Self {
        let layout = BoardLayout::default();
        LayoutJson {
            hand_len: layout.hand_len,
            indicator_len: layout.indicator_len,
            dead_wall_len: layout.dead_wall_len,
        }
    }
}

impl From<LayoutJson> for BoardLayout {
    fn from(layout: LayoutJson) -> Self {
        BoardLayout {
            hand_len: layout.hand_len,
            indicator_len: layout.indicator_len,
            dead_wall_len: layout.dead_wall_len,
        }
    }
}

/// Solver settings for a batch of candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveOptions {
    pub max_times: i64,
    pub max_choice: i64,
    /// Leading wall tiles to treat as unavailable
    pub locked: usize,
    pub layout: LayoutJson,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            max_times: 3,
            max_choice: 3,
            locked: 0,
            layout: LayoutJson::default(),
        }
    }
}

impl SolveOptions {
    pub fn limits(&self) -> Limits {
        to_limits(self.max_times, self.max_choice)
    }
}

/// Batch request: either a flat tile sequence split by `options.layout`, or
/// an already partitioned board
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub tiles: Option<Vec<String>>,
    #[serde(default)]
    pub board: Option<BoardJson>,
    /// One `TARGET [WAITS]` line per candidate
    pub candidates: String,
    #[serde(default)]
    pub options: SolveOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationJson {
    pub target: String,
    pub waits: String,
    #[serde(flatten)]
    pub result: SolutionJson,
    /// One line per round, e.g. `"1m, 1m, 9s"`
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub results: Vec<EvaluationJson>,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayRoundJson {
    pub positions: Vec<usize>,
    pub drawn: Vec<String>,
    pub hand: Vec<String>,
}

/// Wall-clock timer that also works inside the browser
#[derive(Clone, Copy)]
struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            start_ms: now_ms(),
        }
    }

    fn elapsed_ms(&self) -> f64 {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
        #[cfg(target_arch = "wasm32")]
        {
            now_ms() - self.start_ms
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Negative round counts mean no rounds; a non-positive round size leaves
/// nothing to search. Values past `usize::MAX` saturate.
fn to_limits(max_times: i64, max_choice: i64) -> Limits {
    let to_usize = |v: i64| usize::try_from(v.max(0)).unwrap_or(usize::MAX);
    Limits::new(to_usize(max_times), to_usize(max_choice))
}

fn parse_json<T: for<'de> Deserialize<'de>>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn codes(tiles: &[Tile]) -> Vec<String> {
    tiles.iter().map(Tile::to_string).collect()
}

fn steps_to_codes(steps: &[ExchangeStep]) -> Vec<Vec<String>> {
    steps.iter().map(|step| codes(&step.discards)).collect()
}

impl BoardJson {
    pub fn to_board(&self) -> Result<Board, String> {
        Ok(Board::new(
            parse_tiles(&self.hand)?,
            parse_tiles(&self.dora)?,
            parse_tiles(&self.wall)?,
            parse_tiles(&self.deadwall)?,
        ))
    }
}

impl SolutionJson {
    pub fn from_solution(solution: Option<&Solution>) -> Self {
        match solution {
            Some(solution) => SolutionJson {
                take: solution.take as i64,
                solution: Some(steps_to_codes(&solution.steps)),
                waited: solution.waited as i64,
            },
            None => SolutionJson {
                take: -1,
                solution: None,
                waited: -1,
            },
        }
    }
}

impl EvaluationJson {
    fn from_evaluation(evaluation: &Evaluation) -> Self {
        let Candidate { target, waits } = &evaluation.candidate;
        let steps = evaluation
            .solution
            .as_ref()
            .map(|s| s.steps.iter().map(ExchangeStep::to_string).collect())
            .unwrap_or_default();

        EvaluationJson {
            target: format_compact(target),
            waits: format_compact(waits),
            result: SolutionJson::from_solution(evaluation.solution.as_ref()),
            steps,
        }
    }
}

/// Solve a single target against a board given as JSON.
///
/// Tile codes are matched exactly; callers normalize red fives themselves.
pub fn solve_request(
    board_json: &str,
    target_json: &str,
    max_times: i64,
    max_choice: i64,
    waiting_json: &str,
) -> Result<SolutionJson, String> {
    let board = parse_json::<BoardJson>("board", board_json)?.to_board()?;
    let target = parse_tiles(&parse_json::<Vec<String>>("target", target_json)?)?;
    let waiting = parse_tiles(&parse_json::<Vec<String>>("waiting", waiting_json)?)?;

    let solution = solver::solve(
        &board.hand,
        &target,
        to_limits(max_times, max_choice),
        &board.wall,
        &board.dead_wall,
        &waiting,
    );
    Ok(SolutionJson::from_solution(solution.as_ref()))
}

/// Rank every candidate of the request against its board
pub fn evaluate_request(request_json: &str) -> Result<EvaluateResponse, String> {
    let request: EvaluateRequest = parse_json("request", request_json)?;
    let stopwatch = Stopwatch::start();

    let board = match (&request.tiles, &request.board) {
        (Some(tiles), _) => BoardLayout::from(request.options.layout).split(&parse_tiles(tiles)?)?,
        (None, Some(board)) => board.to_board()?,
        (None, None) => return Err("Request needs either \"tiles\" or \"board\"".to_string()),
    };
    let board = board.normalized().locked(request.options.locked);

    let candidates = parse_candidates(&request.candidates)?;
    let evaluations = evaluate_candidates(&board, candidates, request.options.limits());

    Ok(EvaluateResponse {
        results: evaluations.iter().map(EvaluationJson::from_evaluation).collect(),
        elapsed_ms: stopwatch.elapsed_ms(),
    })
}

/// Replay a plan against a hand and dead wall, all given as JSON
pub fn replay_request(
    hand_json: &str,
    dead_wall_json: &str,
    steps_json: &str,
) -> Result<Vec<ReplayRoundJson>, String> {
    let hand = parse_tiles(&parse_json::<Vec<String>>("hand", hand_json)?)?;
    let dead_wall = parse_tiles(&parse_json::<Vec<String>>("dead wall", dead_wall_json)?)?;
    let steps = parse_json::<Vec<Vec<String>>>("steps", steps_json)?
        .iter()
        .map(|step| parse_tiles(step).map(ExchangeStep::new))
        .collect::<Result<Vec<_>, _>>()?;

    let rounds = replay_plan(&hand, &dead_wall, &steps)?;
    Ok(rounds
        .iter()
        .map(|round: &ReplayRound| ReplayRoundJson {
            positions: round.positions.clone(),
            drawn: codes(&round.drawn),
            hand: codes(&round.hand_after),
        })
        .collect())
}
