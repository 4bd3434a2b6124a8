use crate::solver::{self, Limits};
use crate::{Solution, Tile};

/// Where each segment sits in a flat tile sequence read from the game:
/// `hand | indicators | wall | dead wall`.
///
/// The dead wall is the final `dead_wall_len` tiles; the wall is whatever
/// lies between the indicators and the dead wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub hand_len: usize,
    /// Dora and ura-dora indicators; carried along but never solved against
    pub indicator_len: usize,
    pub dead_wall_len: usize,
}

impl Default for BoardLayout {
    fn default() -> Self {
        BoardLayout {
            hand_len: 13,
            indicator_len: 10,
            dead_wall_len: 14,
        }
    }
}

impl BoardLayout {
    /// Minimum sequence length this layout can split, or `None` when the
    /// lengths overflow
    pub fn min_len(&self) -> Option<usize> {
        self.hand_len
            .checked_add(self.indicator_len)?
            .checked_add(self.dead_wall_len)
    }

    /// Split a flat tile sequence into a board
    pub fn split(&self, tiles: &[Tile]) -> Result<Board, String> {
        let min_len = self
            .min_len()
            .ok_or_else(|| "Board layout lengths overflow".to_string())?;
        if tiles.len() < min_len {
            return Err(format!(
                "Board needs at least {} tiles, got {}",
                min_len,
                tiles.len()
            ));
        }

        let (hand, rest) = tiles.split_at(self.hand_len);
        let (indicators, rest) = rest.split_at(self.indicator_len);
        let (wall, dead_wall) = rest.split_at(rest.len() - self.dead_wall_len);

        Ok(Board::new(
            hand.to_vec(),
            indicators.to_vec(),
            wall.to_vec(),
            dead_wall.to_vec(),
        ))
    }
}

/// Visible state of one exchange phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Held tiles, kept in canonical order
    pub hand: Vec<Tile>,
    pub indicators: Vec<Tile>,
    /// Future draws, front first
    pub wall: Vec<Tile>,
    /// Replacement tiles for exchanges, front first
    pub dead_wall: Vec<Tile>,
}

impl Board {
    /// Create a board; the hand is sorted into canonical order
    pub fn new(
        mut hand: Vec<Tile>,
        indicators: Vec<Tile>,
        wall: Vec<Tile>,
        dead_wall: Vec<Tile>,
    ) -> Self {
        hand.sort();
        Board {
            hand,
            indicators,
            wall,
            dead_wall,
        }
    }

    /// Copy of the board with every red five folded into its plain five
    pub fn normalized(&self) -> Board {
        let fold = |tiles: &[Tile]| tiles.iter().map(|t| t.normalized()).collect::<Vec<_>>();
        Board::new(
            fold(&self.hand),
            fold(&self.indicators),
            fold(&self.wall),
            fold(&self.dead_wall),
        )
    }

    /// Copy of the board without the first `locked` wall tiles
    pub fn locked(&self, locked: usize) -> Board {
        let skip = locked.min(self.wall.len());
        Board {
            wall: self.wall[skip..].to_vec(),
            ..self.clone()
        }
    }

    /// Solve for `target` against this board
    pub fn solve(&self, target: &[Tile], limits: Limits, win_set: &[Tile]) -> Option<Solution> {
        solver::solve(&self.hand, target, limits, &self.wall, &self.dead_wall, win_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{format_compact, parse_compact};

    #[test]
    fn test_split_default_layout() {
        let mut codes = String::new();
        codes.push_str("9m1m2m3m4m5m6m7m8m1p2p3p4p"); // hand
        codes.push_str("1z2z3z4z5z6z7z1s2s3s"); // indicators
        codes.push_str("5p6p7p"); // wall
        codes.push_str("1s1s1s2s2s2s3s3s3s4s4s4s5s5s"); // dead wall
        let tiles = parse_compact(&codes).unwrap();

        let board = BoardLayout::default().split(&tiles).unwrap();
        assert_eq!(format_compact(&board.hand), "1m2m3m4m5m6m7m8m9m1p2p3p4p");
        assert_eq!(board.indicators.len(), 10);
        assert_eq!(format_compact(&board.wall), "5p6p7p");
        assert_eq!(board.dead_wall.len(), 14);
        assert_eq!(board.dead_wall[0].to_string(), "1s");
    }

    #[test]
    fn test_split_too_short() {
        let tiles = parse_compact("1m2m3m").unwrap();
        let layout = BoardLayout {
            hand_len: 2,
            indicator_len: 0,
            dead_wall_len: 2,
        };
        let err = layout.split(&tiles).unwrap_err();
        assert!(err.contains("at least 4"));
    }

    #[test]
    fn test_split_rejects_overflowing_layout() {
        let tiles = parse_compact("1m2m").unwrap();
        let layout = BoardLayout {
            hand_len: usize::MAX,
            indicator_len: 1,
            dead_wall_len: 0,
        };
        assert_eq!(layout.min_len(), None);
        assert_eq!(layout.split(&tiles).unwrap_err(), "Board layout lengths overflow");

        let layout = BoardLayout {
            hand_len: 1,
            indicator_len: 0,
            dead_wall_len: usize::MAX,
        };
        assert!(layout.split(&tiles).is_err());
    }

    #[test]
    fn test_split_empty_wall() {
        let tiles = parse_compact("1m2m3m4m").unwrap();
        let layout = BoardLayout {
            hand_len: 2,
            indicator_len: 0,
            dead_wall_len: 2,
        };
        let board = layout.split(&tiles).unwrap();
        assert!(board.wall.is_empty());
        assert_eq!(format_compact(&board.dead_wall), "3m4m");
    }

    #[test]
    fn test_normalized() {
        let board = Board::new(
            parse_compact("0p1m").unwrap(),
            parse_compact("0s").unwrap(),
            parse_compact("0m5m").unwrap(),
            parse_compact("0p").unwrap(),
        );
        let normalized = board.normalized();
        assert_eq!(format_compact(&normalized.hand), "1m5p");
        assert_eq!(format_compact(&normalized.indicators), "5s");
        assert_eq!(format_compact(&normalized.wall), "5m5m");
        assert_eq!(format_compact(&normalized.dead_wall), "5p");
    }

    #[test]
    fn test_locked() {
        let board = Board::new(Vec::new(), Vec::new(), parse_compact("1m2m3m").unwrap(), Vec::new());
        assert_eq!(format_compact(&board.locked(0).wall), "1m2m3m");
        assert_eq!(format_compact(&board.locked(2).wall), "3m");
        assert!(board.locked(7).wall.is_empty());
    }

    #[test]
    fn test_board_solve() {
        let board = Board::new(
            parse_compact("1m1m9s").unwrap(),
            Vec::new(),
            parse_compact("4p2m").unwrap(),
            parse_compact("7z").unwrap(),
        );
        let target = parse_compact("1m7z").unwrap();
        let solution = board.solve(&target, Limits::new(1, 1), &parse_compact("2m").unwrap()).unwrap();
        assert_eq!(solution.take, 0);
        assert_eq!(solution.steps.len(), 1);
        assert_eq!(solution.waited, 1);
    }
}
