use crate::{ExchangeStep, Solution, Tile, TileCounts, count_tiles};
use std::collections::HashSet;

/// Caps on how an exchange plan may be split into rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of exchange rounds
    pub max_times: usize,
    /// Maximum number of tiles discarded in a single round
    pub max_choice: usize,
}

impl Limits {
    pub fn new(max_times: usize, max_choice: usize) -> Self {
        Limits { max_times, max_choice }
    }
}

/// A plan found for a fixed number of wall draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Wall tiles drawn
    pub take: usize,
    /// Dead wall tiles consumed by the exchange rounds
    pub change: usize,
    pub steps: Vec<ExchangeStep>,
}

/// Outcome of planning a single exchange round
#[derive(Debug, Clone, PartialEq, Eq)]
struct Round {
    discards: Vec<Tile>,
    need: TileCounts,
    hand: TileCounts,
}

// ============================================================================
// Feasibility
// ============================================================================

/// Per-type deficit: `target - hand - dead_wall[..change] - wall[..take]`.
///
/// Positive entries are tiles still missing, negative entries are surplus.
/// `take` and `change` are clamped to the queue lengths.
pub fn shortfall(
    hand: &TileCounts,
    target: &TileCounts,
    wall: &[Tile],
    dead_wall: &[Tile],
    take: usize,
    change: usize,
) -> TileCounts {
    let drawn = count_tiles(&wall[..take.min(wall.len())]);
    let exchanged = count_tiles(&dead_wall[..change.min(dead_wall.len())]);
    *target - *hand - exchanged - drawn
}

/// Check that no tile type is short
pub fn is_covered(need: &TileCounts) -> bool {
    need.max_entry() <= 0
}

// ============================================================================
// Greedy exchange planner
// ============================================================================

/// Split `dead_wall_prefix.len()` exchanges into rounds.
///
/// Each round walks the tile types of the current hand in canonical order and
/// discards copies of every type still in surplus (`need < 0`), up to
/// `max_choice` tiles per round and never past the total. The discards of a
/// round are then replaced by the next dead wall tiles, in queue order.
///
/// Returns `None` when a round cannot discard anything or when `max_times`
/// rounds are not enough. This is a greedy heuristic: some numerically
/// feasible inputs are rejected because of the caps.
pub fn plan_exchanges(
    hand: &TileCounts,
    need: &TileCounts,
    dead_wall_prefix: &[Tile],
    limits: Limits,
) -> Option<Vec<ExchangeStep>> {
    let change = dead_wall_prefix.len();
    let mut hand = *hand;
    let mut need = *need;
    let mut steps = Vec::new();
    let mut total_changed = 0;

    while total_changed < change {
        if steps.len() >= limits.max_times {
            return None;
        }

        let round = plan_round(&hand, &need, limits.max_choice.min(change - total_changed));
        if round.discards.is_empty() {
            return None;
        }

        let changed = round.discards.len();
        hand = round.hand;
        need = round.need;
        for &drawn in &dead_wall_prefix[total_changed..total_changed + changed] {
            hand.add(drawn);
        }

        total_changed += changed;
        steps.push(ExchangeStep::new(round.discards));
    }

    Some(steps)
}

/// Choose the discards of one round, discarding at most `budget` tiles
fn plan_round(hand: &TileCounts, need: &TileCounts, budget: usize) -> Round {
    let mut hand = *hand;
    let mut need = *need;
    let mut discards = Vec::with_capacity(budget);

    for tile in Tile::all() {
        let room = budget - discards.len();
        if room == 0 {
            break;
        }

        let count = hand.get(tile);
        let surplus = -need.get(tile);
        if count <= 0 || surplus <= 0 {
            continue;
        }

        let throw = (surplus.min(count) as usize).min(room);
        need.add_n(tile, throw as i32);
        hand.add_n(tile, -(throw as i32));
        discards.extend(std::iter::repeat_n(tile, throw));
    }

    Round { discards, need, hand }
}

// ============================================================================
// Searches
// ============================================================================

/// One solve call's inputs, counted once
#[derive(Debug, Clone)]
pub struct Problem<'a> {
    pub hand: TileCounts,
    pub target: TileCounts,
    pub wall: &'a [Tile],
    pub dead_wall: &'a [Tile],
    pub limits: Limits,
}

impl<'a> Problem<'a> {
    pub fn new(
        hand: &[Tile],
        target: &[Tile],
        wall: &'a [Tile],
        dead_wall: &'a [Tile],
        limits: Limits,
    ) -> Self {
        Problem {
            hand: count_tiles(hand),
            target: count_tiles(target),
            wall,
            dead_wall,
            limits,
        }
    }

    /// Deficit after drawing `take` wall tiles and exchanging `change` times
    pub fn shortfall(&self, take: usize, change: usize) -> TileCounts {
        shortfall(&self.hand, &self.target, self.wall, self.dead_wall, take, change)
    }

    /// Smallest exchange count that works with `take` wall draws.
    ///
    /// Exchange counts are tried in ascending order. A count is only tried
    /// when the dead wall tile it adds (the last one of the prefix) is part
    /// of the target; earlier prefix tiles are not checked.
    pub fn search_change(&self, take: usize) -> Option<Plan> {
        for change in 0..=self.dead_wall.len() {
            if change > 0 && !self.target.contains(self.dead_wall[change - 1]) {
                continue;
            }

            let need = self.shortfall(take, change);
            if !is_covered(&need) {
                continue;
            }

            if let Some(steps) =
                plan_exchanges(&self.hand, &need, &self.dead_wall[..change], self.limits)
            {
                return Some(Plan { take, change, steps });
            }
        }

        None
    }

    /// Smallest `take` found by binary search over `0..=wall.len()`.
    ///
    /// Assumes that once `search_change` succeeds for some `take`, it also
    /// succeeds for every larger one. The greedy planner does not guarantee
    /// this, so a smaller feasible `take` can be missed; compare with
    /// [`Problem::search_take_linear`].
    pub fn search_take(&self) -> Option<Plan> {
        binary_search_take(self.wall.len(), |take| self.search_change(take))
    }

    /// Smallest `take` found by trying every value in ascending order
    pub fn search_take_linear(&self) -> Option<Plan> {
        (0..=self.wall.len()).find_map(|take| self.search_change(take))
    }
}

/// Binary search for the smallest `take` in `0..=wall_len` accepted by `attempt`
fn binary_search_take<F>(wall_len: usize, mut attempt: F) -> Option<Plan>
where
    F: FnMut(usize) -> Option<Plan>,
{
    let mut low = 0;
    let mut high = wall_len;
    let mut best: Option<Plan> = None;

    while low <= high {
        let mid = (low + high) / 2;
        match attempt(mid) {
            None => low = mid + 1,
            Some(plan) => {
                if best.as_ref().is_none_or(|b| b.take > plan.take) {
                    best = Some(plan);
                }
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            }
        }
    }

    best
}

// ============================================================================
// Scoring and entry points
// ============================================================================

/// Count winning tiles left in the wall after drawing `take` tiles.
///
/// Membership is exact: red fives and plain fives are different tiles here.
pub fn count_waits(wall: &[Tile], take: usize, win_set: &[Tile]) -> usize {
    let winning: HashSet<Tile> = win_set.iter().copied().collect();
    wall.get(take..)
        .unwrap_or(&[])
        .iter()
        .filter(|tile| winning.contains(tile))
        .count()
}

/// Find the fewest wall draws that reach `target`, with the exchange plan
/// and the number of winning tiles left afterwards.
///
/// Returns `None` when no plan exists, when `target` is empty, or when
/// `max_choice` is 0. With `max_times` 0 only plans without exchanges exist.
pub fn solve(
    hand: &[Tile],
    target: &[Tile],
    limits: Limits,
    wall: &[Tile],
    dead_wall: &[Tile],
    win_set: &[Tile],
) -> Option<Solution> {
    solve_with(hand, target, limits, wall, dead_wall, win_set, false)
}

/// Same as [`solve`] but scans every `take` instead of binary searching
pub fn solve_linear(
    hand: &[Tile],
    target: &[Tile],
    limits: Limits,
    wall: &[Tile],
    dead_wall: &[Tile],
    win_set: &[Tile],
) -> Option<Solution> {
    solve_with(hand, target, limits, wall, dead_wall, win_set, true)
}

fn solve_with(
    hand: &[Tile],
    target: &[Tile],
    limits: Limits,
    wall: &[Tile],
    dead_wall: &[Tile],
    win_set: &[Tile],
    linear: bool,
) -> Option<Solution> {
    if target.is_empty() || limits.max_choice == 0 {
        return None;
    }

    let problem = Problem::new(hand, target, wall, dead_wall, limits);
    let plan = if linear {
        problem.search_take_linear()?
    } else {
        problem.search_take()?
    };

    Some(Solution {
        take: plan.take,
        waited: count_waits(wall, plan.take, win_set),
        steps: plan.steps,
    })
}
