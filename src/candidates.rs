use crate::board::Board;
use crate::solver::Limits;
use crate::{Solution, Tile, parse_compact};

/// A hand the player would like to reach, with the tiles that would win it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Target tiles, normalized and sorted
    pub target: Vec<Tile>,
    /// Winning tiles, normalized
    pub waits: Vec<Tile>,
}

impl Candidate {
    pub fn new(target: &[Tile], waits: &[Tile]) -> Self {
        let mut target: Vec<Tile> = target.iter().map(|t| t.normalized()).collect();
        target.sort();
        Candidate {
            target,
            waits: waits.iter().map(|t| t.normalized()).collect(),
        }
    }

    /// Parse `"TARGET WAITS"`, e.g. `"1m1m2p3p4p 1m"`.
    ///
    /// Everything after the first space is the wait list. Returns `None`
    /// for a blank line or an empty target.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (target, waits) = line.split_once(' ').unwrap_or((line, ""));

        let target = parse_compact(target).map_err(|e| format!("Target {:?}: {}", line, e))?;
        if target.is_empty() {
            return Ok(None);
        }
        let waits = parse_compact(waits).map_err(|e| format!("Waits {:?}: {}", line, e))?;

        Ok(Some(Candidate::new(&target, &waits)))
    }
}

/// Parse one candidate per line, skipping blank lines
pub fn parse_candidates(text: &str) -> Result<Vec<Candidate>, String> {
    let mut candidates = Vec::new();
    for line in text.lines() {
        if let Some(candidate) = Candidate::parse(line)? {
            candidates.push(candidate);
        }
    }
    Ok(candidates)
}

/// A candidate together with its solve result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub candidate: Candidate,
    pub solution: Option<Solution>,
}

impl Evaluation {
    /// Winning tiles left after the plan, or -1 without a plan
    pub fn waited(&self) -> i64 {
        self.solution.as_ref().map_or(-1, |s| s.waited as i64)
    }
}

/// Solve every candidate against the board and rank by remaining winning
/// tiles, best first. Unsolvable candidates go last; ties keep input order.
pub fn evaluate_candidates(board: &Board, candidates: Vec<Candidate>, limits: Limits) -> Vec<Evaluation> {
    let mut evaluations: Vec<Evaluation> = candidates
        .into_iter()
        .map(|candidate| {
            let solution = board.solve(&candidate.target, limits, &candidate.waits);
            Evaluation { candidate, solution }
        })
        .collect();

    evaluations.sort_by_key(|e| std::cmp::Reverse(e.waited()));
    evaluations
}
