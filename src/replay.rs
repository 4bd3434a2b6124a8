use crate::{ExchangeStep, Tile};

/// What one exchange round looks like when carried out on the live hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRound {
    /// Hand positions to select, in discard order, before the round
    pub positions: Vec<usize>,
    /// Dead wall tiles received for the discards
    pub drawn: Vec<Tile>,
    /// Sorted hand once the round is done
    pub hand_after: Vec<Tile>,
}

/// Walk an exchange plan the way it is executed in the game.
///
/// Each discard is resolved to the first unused position of that tile in the
/// current sorted hand. After a round exactly as many tiles as were discarded
/// are taken from the front of the remaining dead wall and the hand is
/// sorted again before the next round.
pub fn replay_plan(
    hand: &[Tile],
    dead_wall: &[Tile],
    steps: &[ExchangeStep],
) -> Result<Vec<ReplayRound>, String> {
    let mut current: Vec<Tile> = hand.to_vec();
    current.sort();
    let mut offset = 0;
    let mut rounds = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        let positions = resolve_positions(&current, step)
            .map_err(|tile| format!("Round {}: tile {} is not in hand", index + 1, tile))?;

        let end = offset + step.len();
        let drawn = dead_wall
            .get(offset..end)
            .ok_or_else(|| format!("Round {}: dead wall is exhausted", index + 1))?
            .to_vec();
        offset = end;

        let mut next: Vec<Tile> = current
            .iter()
            .enumerate()
            .filter(|(position, _)| !positions.contains(position))
            .map(|(_, &tile)| tile)
            .collect();
        next.extend_from_slice(&drawn);
        next.sort();

        rounds.push(ReplayRound {
            positions,
            drawn,
            hand_after: next.clone(),
        });
        current = next;
    }

    Ok(rounds)
}

/// Map each discard to a distinct hand position, or return the missing tile
fn resolve_positions(hand: &[Tile], step: &ExchangeStep) -> Result<Vec<usize>, Tile> {
    let mut used = vec![false; hand.len()];
    let mut positions = Vec::with_capacity(step.len());

    for &discard in &step.discards {
        let position = (0..hand.len())
            .find(|&i| hand[i] == discard && !used[i])
            .ok_or(discard)?;
        used[position] = true;
        positions.push(position);
    }

    Ok(positions)
}
