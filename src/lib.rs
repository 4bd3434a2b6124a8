use std::fmt;
use std::ops::Sub;

pub mod api;
pub mod board;
pub mod candidates;
pub mod replay;
pub mod solver;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

/// Suit of a tile, declared in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Synthetic placeholder type (`1a`)
    Placeholder,
    Man,
    Pin,
    Sou,
    /// Winds and dragons (`1z`-`7z`)
    Honor,
}

impl Suit {
    /// Suit letter used in tile codes
    pub fn letter(self) -> char {
        match self {
            Suit::Placeholder => 'a',
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Honor => 'z',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' => Some(Suit::Placeholder),
            'm' => Some(Suit::Man),
            'p' => Some(Suit::Pin),
            's' => Some(Suit::Sou),
            'z' => Some(Suit::Honor),
            _ => None,
        }
    }

    /// First ordinal of this suit
    fn base(self) -> u8 {
        match self {
            Suit::Placeholder => 0,
            Suit::Man => 1,
            Suit::Pin => 11,
            Suit::Sou => 21,
            Suit::Honor => 31,
        }
    }
}

/// One tile type, stored as its ordinal in the canonical order:
///
/// `1a < 1m..4m < 0m < 5m..9m < 1p..4p < 0p < 5p..9p < 1s..4s < 0s < 5s..9s < 1z..7z`
///
/// Rank 0 in a numbered suit is the red five. It is a distinct tile type
/// until [`Tile::normalized`] folds it into the plain five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

impl Tile {
    /// Number of distinct tile types, including the placeholder and red fives
    pub const KINDS: usize = 38;

    /// Create a tile from a suit and rank.
    ///
    /// Numbered suits take ranks 0-9 (0 = red five), honors 1-7 and the
    /// placeholder only 1.
    pub fn new(suit: Suit, rank: u8) -> Self {
        Self::checked(suit, rank).unwrap_or_else(|| {
            panic!("Invalid rank {} for suit {:?}", rank, suit)
        })
    }

    fn checked(suit: Suit, rank: u8) -> Option<Self> {
        let offset = match suit {
            Suit::Placeholder => (rank == 1).then_some(0)?,
            Suit::Man | Suit::Pin | Suit::Sou => match rank {
                1..=4 => rank - 1,
                0 => 4,
                5..=9 => rank,
                _ => return None,
            },
            Suit::Honor => (1..=7).contains(&rank).then(|| rank - 1)?,
        };
        Some(Tile(suit.base() + offset))
    }

    /// The synthetic placeholder tile (`1a`)
    pub fn placeholder() -> Self {
        Tile(0)
    }

    /// Every tile type in canonical order
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..Self::KINDS as u8).map(Tile)
    }

    /// Canonical ordinal (0..KINDS)
    pub fn ordinal(self) -> usize {
        self.0 as usize
    }

    pub fn suit(self) -> Suit {
        match self.0 {
            0 => Suit::Placeholder,
            1..=10 => Suit::Man,
            11..=20 => Suit::Pin,
            21..=30 => Suit::Sou,
            _ => Suit::Honor,
        }
    }

    /// Rank as written in the tile code (0 for red fives)
    pub fn rank(self) -> u8 {
        let suit = self.suit();
        let offset = self.0 - suit.base();
        match suit {
            Suit::Placeholder => 1,
            Suit::Man | Suit::Pin | Suit::Sou => match offset {
                0..=3 => offset + 1,
                4 => 0,
                _ => offset,
            },
            Suit::Honor => offset + 1,
        }
    }

    /// Check if this is a red five (`0m`, `0p`, `0s`)
    pub fn is_red(self) -> bool {
        self.rank() == 0
    }

    /// Fold a red five into its plain five; every other tile is unchanged
    pub fn normalized(self) -> Self {
        if self.is_red() {
            Tile::new(self.suit(), 5)
        } else {
            self
        }
    }

    /// Parse a two-character tile code such as `"5p"`, `"0s"` or `"7z"`
    pub fn from_code(code: &str) -> Result<Self, String> {
        let mut chars = code.chars();
        let (Some(rank_char), Some(suit_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(format!("Invalid tile code: {:?}", code));
        };

        let rank = rank_char
            .to_digit(10)
            .ok_or_else(|| format!("Invalid rank in tile code: {:?}", code))? as u8;
        let suit = Suit::from_letter(suit_char)
            .ok_or_else(|| format!("Invalid suit in tile code: {:?}", code))?;

        Self::checked(suit, rank).ok_or_else(|| format!("Rank out of range in tile code: {:?}", code))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit().letter())
    }
}

/// Parse a list of individual tile codes
pub fn parse_tiles<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Tile>, String> {
    codes.iter().map(|code| Tile::from_code(code.as_ref())).collect()
}

/// Parse a compact run of tile codes such as `"1m1m2p7z"`
pub fn parse_compact(input: &str) -> Result<Vec<Tile>, String> {
    let chars: Vec<char> = input.trim().chars().collect();
    if chars.len() % 2 != 0 {
        return Err(format!("Odd number of characters in tile string: {:?}", input));
    }
    chars
        .chunks(2)
        .map(|pair| Tile::from_code(&pair.iter().collect::<String>()))
        .collect()
}

/// Join tiles as a compact code string
pub fn format_compact(tiles: &[Tile]) -> String {
    tiles.iter().map(|tile| tile.to_string()).collect()
}

/// A multiset of tiles: one signed count per tile type, indexed by ordinal.
///
/// Counts are signed so the same type can hold a deficit vector
/// (target minus available tiles). Iteration always follows the canonical
/// tile order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCounts([i32; Tile::KINDS]);

impl TileCounts {
    /// Create an empty multiset
    pub fn new() -> Self {
        TileCounts([0; Tile::KINDS])
    }

    /// Count every tile of a sequence
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut counts = Self::new();
        for &tile in tiles {
            counts.add(tile);
        }
        counts
    }

    /// Add one copy of a tile
    pub fn add(&mut self, tile: Tile) {
        self.0[tile.ordinal()] += 1;
    }

    /// Adjust the count of a tile by `delta`
    pub fn add_n(&mut self, tile: Tile, delta: i32) {
        self.0[tile.ordinal()] += delta;
    }

    /// Remove one copy of a tile
    pub fn remove(&mut self, tile: Tile) {
        self.0[tile.ordinal()] -= 1;
    }

    /// Get the count of a specific tile
    pub fn get(&self, tile: Tile) -> i32 {
        self.0[tile.ordinal()]
    }

    /// Check if at least one copy of the tile is present
    pub fn contains(&self, tile: Tile) -> bool {
        self.get(tile) > 0
    }

    /// Non-zero entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Tile, i32)> + '_ {
        Tile::all()
            .map(|tile| (tile, self.get(tile)))
            .filter(|&(_, count)| count != 0)
    }

    /// Sum of all counts
    pub fn total(&self) -> i32 {
        self.0.iter().sum()
    }

    /// Largest single entry (0 for an empty multiset)
    pub fn max_entry(&self) -> i32 {
        self.0.iter().copied().max().unwrap_or(0).max(0)
    }

    /// Check if every tile type has at least as many copies as in `other`
    pub fn covers(&self, other: &TileCounts) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(have, want)| have >= want)
    }

    /// Expand positive entries back into a sorted tile list
    pub fn to_tiles(&self) -> Vec<Tile> {
        self.iter()
            .filter(|&(_, count)| count > 0)
            .flat_map(|(tile, count)| std::iter::repeat_n(tile, count as usize))
            .collect()
    }
}

impl Default for TileCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl Sub for TileCounts {
    type Output = TileCounts;

    fn sub(mut self, rhs: TileCounts) -> TileCounts {
        for (entry, other) in self.0.iter_mut().zip(rhs.0.iter()) {
            *entry -= other;
        }
        self
    }
}

/// Count the tiles of a sequence into a multiset
pub fn count_tiles(tiles: &[Tile]) -> TileCounts {
    TileCounts::from_tiles(tiles)
}

/// One exchange round: the tiles discarded together, in canonical order.
/// Each discard is replaced by the next dead wall tile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeStep {
    pub discards: Vec<Tile>,
}

impl ExchangeStep {
    pub fn new(discards: Vec<Tile>) -> Self {
        ExchangeStep { discards }
    }

    pub fn len(&self) -> usize {
        self.discards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discards.is_empty()
    }
}

impl fmt::Display for ExchangeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = self.discards.iter().map(|tile| tile.to_string()).collect();
        write!(f, "{}", codes.join(", "))
    }
}

/// A successful plan: draw `take` wall tiles and run `steps` in order.
/// `waited` counts winning tiles left in the wall after the draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub take: usize,
    pub steps: Vec<ExchangeStep>,
    pub waited: usize,
}

impl Solution {
    /// Total number of tiles exchanged across all rounds
    pub fn change(&self) -> usize {
        self.steps.iter().map(ExchangeStep::len).sum()
    }
}
