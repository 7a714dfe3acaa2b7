//! Board layout: the two paths over the 3x8 grid.
//!
//! Each color walks 14 squares. Both paths start on their own outer row,
//! run down the shared middle row, and turn back onto their own row to
//! leave the board:
//!
//! ```text
//!          col: 0  1  2  3  4  5  6  7
//!   row 0 (dark)  *  .  .  .        *  .
//!   row 1         .  .  .  *  .  .  .  .     shared lane
//!   row 2 (light) *  .  .  .        *  .
//! ```
//!
//! Rosettes (`*`) are stored as path indices and apply to both colors.
//! Cells used by neither path (the four gaps) are not playable.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{is_on_board, Color, ColorMap, SquareIndex, PATH_LEN};

/// Number of grid rows.
pub const BOARD_ROWS: u8 = 3;

/// Number of grid columns.
pub const BOARD_COLS: u8 = 8;

/// Traditional rosette indices: entry-side, mid-board, last before home.
pub const TRADITIONAL_ROSETTES: [SquareIndex; 3] = [3, 7, 13];

/// A grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row, 0 at the top.
    pub row: u8,
    /// Column, 0 at the left.
    pub col: u8,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True if the cell lies inside the 3x8 grid.
    #[must_use]
    pub const fn in_grid(self) -> bool {
        self.row < BOARD_ROWS && self.col < BOARD_COLS
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Inconsistent layout data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("{color} path has {len} squares, expected 14")]
    WrongLength { color: Color, len: usize },

    #[error("{color} path square {index} at {coord} is outside the 3x8 grid")]
    OutOfGrid {
        color: Color,
        index: usize,
        coord: Coord,
    },

    #[error("{color} path visits {coord} twice")]
    Revisit { color: Color, coord: Coord },

    #[error("paths cross at {coord} with different indices (light {light}, dark {dark})")]
    MisalignedCrossing { coord: Coord, light: usize, dark: usize },

    #[error("rosette index {0} is not an on-board square")]
    RosetteOutOfRange(SquareIndex),
}

/// Serialized form of a layout; validated into `BoardLayout`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Light path cells in walking order.
    pub light: Vec<Coord>,
    /// Dark path cells in walking order.
    pub dark: Vec<Coord>,
    /// Rosette indices, applied to both paths.
    pub rosettes: Vec<SquareIndex>,
}

/// Validated board topology.
///
/// Everything the rules need is a constant-time lookup: path coordinates,
/// rosette flags and shared-lane flags by index, and the reverse index from
/// cell to path position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutSpec", into = "LayoutSpec")]
pub struct BoardLayout {
    paths: ColorMap<[Coord; PATH_LEN]>,
    rosettes: [bool; PATH_LEN],
    shared: [bool; PATH_LEN],
    reverse: ColorMap<FxHashMap<Coord, SquareIndex>>,
}

impl BoardLayout {
    /// The traditional layout.
    #[must_use]
    pub fn traditional() -> Self {
        let light = Self::traditional_path(2);
        let dark = Self::traditional_path(0);
        match Self::new(&light, &dark, &TRADITIONAL_ROSETTES) {
            Ok(layout) => layout,
            Err(e) => unreachable!("traditional layout is valid: {e}"),
        }
    }

    /// Four squares leftward on the home row, the full middle row, then
    /// two squares back on the home row.
    fn traditional_path(home_row: u8) -> Vec<Coord> {
        let entry = (0..4).rev().map(|col| Coord::new(home_row, col));
        let lane = (0..BOARD_COLS).map(|col| Coord::new(1, col));
        let exit = [Coord::new(home_row, 7), Coord::new(home_row, 6)];
        entry.chain(lane).chain(exit).collect()
    }

    /// Build and validate a layout.
    pub fn new(light: &[Coord], dark: &[Coord], rosettes: &[SquareIndex]) -> Result<Self, LayoutError> {
        let light = Self::validate_path(Color::Light, light)?;
        let dark = Self::validate_path(Color::Dark, dark)?;
        let paths = ColorMap::new(|color| match color {
            Color::Light => light,
            Color::Dark => dark,
        });

        let reverse = ColorMap::new(|color| {
            paths[color]
                .iter()
                .enumerate()
                .map(|(i, &coord)| (coord, i as SquareIndex))
                .collect::<FxHashMap<_, _>>()
        });

        // A cell on both paths must sit at the same index in each.
        for (&coord, &light_index) in &reverse[Color::Light] {
            if let Some(&dark_index) = reverse[Color::Dark].get(&coord) {
                if light_index != dark_index {
                    return Err(LayoutError::MisalignedCrossing {
                        coord,
                        light: light_index as usize,
                        dark: dark_index as usize,
                    });
                }
            }
        }

        let mut rosette_flags = [false; PATH_LEN];
        for &index in rosettes {
            if !is_on_board(index) {
                return Err(LayoutError::RosetteOutOfRange(index));
            }
            rosette_flags[index as usize] = true;
        }

        let shared = std::array::from_fn(|i| light[i] == dark[i]);

        Ok(Self {
            paths,
            rosettes: rosette_flags,
            shared,
            reverse,
        })
    }

    fn validate_path(color: Color, path: &[Coord]) -> Result<[Coord; PATH_LEN], LayoutError> {
        let path: [Coord; PATH_LEN] = path.try_into().map_err(|_| LayoutError::WrongLength {
            color,
            len: path.len(),
        })?;

        for (index, &coord) in path.iter().enumerate() {
            if !coord.in_grid() {
                return Err(LayoutError::OutOfGrid { color, index, coord });
            }
            if path[..index].contains(&coord) {
                return Err(LayoutError::Revisit { color, coord });
            }
        }
        Ok(path)
    }

    // === Index lookups ===

    /// The 14 cells of a color's path, in walking order.
    #[must_use]
    pub fn path_for(&self, color: Color) -> &[Coord; PATH_LEN] {
        &self.paths[color]
    }

    /// Cell of an on-board index; `None` for off-board and scored.
    #[must_use]
    pub fn coord_at(&self, color: Color, index: SquareIndex) -> Option<Coord> {
        is_on_board(index).then(|| self.paths[color][index as usize])
    }

    /// True if the index is a rosette.
    #[must_use]
    pub fn is_rosette(&self, index: SquareIndex) -> bool {
        is_on_board(index) && self.rosettes[index as usize]
    }

    /// True if both colors occupy the same cell at this index.
    #[must_use]
    pub fn is_shared_lane(&self, index: SquareIndex) -> bool {
        is_on_board(index) && self.shared[index as usize]
    }

    /// Rosette indices in ascending order.
    pub fn rosette_indices(&self) -> impl Iterator<Item = SquareIndex> + '_ {
        (0..PATH_LEN as SquareIndex).filter(|&i| self.rosettes[i as usize])
    }

    /// Shared-lane indices in ascending order.
    pub fn shared_lane_indices(&self) -> impl Iterator<Item = SquareIndex> + '_ {
        (0..PATH_LEN as SquareIndex).filter(|&i| self.shared[i as usize])
    }

    /// Index at which `color`'s opponent would stand on the same cell as
    /// `color` at `index`, if the cell is on both paths.
    #[must_use]
    pub fn opponent_index(&self, color: Color, index: SquareIndex) -> Option<SquareIndex> {
        let coord = self.coord_at(color, index)?;
        self.index_at(color.opponent(), coord)
    }

    // === Cell lookups ===

    /// Reverse lookup from cell to path index.
    #[must_use]
    pub fn index_at(&self, color: Color, coord: Coord) -> Option<SquareIndex> {
        self.reverse[color].get(&coord).copied()
    }

    /// True if the cell belongs to at least one path.
    #[must_use]
    pub fn is_playable(&self, coord: Coord) -> bool {
        Color::ALL.iter().any(|&c| self.reverse[c].contains_key(&coord))
    }

    /// True if the cell is a rosette on either path.
    #[must_use]
    pub fn is_rosette_at(&self, coord: Coord) -> bool {
        Color::ALL
            .iter()
            .any(|&c| self.index_at(c, coord).is_some_and(|i| self.is_rosette(i)))
    }

    /// True if the cell is on both paths.
    #[must_use]
    pub fn is_shared_at(&self, coord: Coord) -> bool {
        Color::ALL.iter().all(|&c| self.reverse[c].contains_key(&coord))
    }

    /// Playable cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..BOARD_ROWS)
            .flat_map(|row| (0..BOARD_COLS).map(move |col| Coord::new(row, col)))
            .filter(|&coord| self.is_playable(coord))
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::traditional()
    }
}

impl TryFrom<LayoutSpec> for BoardLayout {
    type Error = LayoutError;

    fn try_from(spec: LayoutSpec) -> Result<Self, Self::Error> {
        Self::new(&spec.light, &spec.dark, &spec.rosettes)
    }
}

impl From<BoardLayout> for LayoutSpec {
    fn from(layout: BoardLayout) -> Self {
        Self {
            light: layout.paths[Color::Light].to_vec(),
            dark: layout.paths[Color::Dark].to_vec(),
            rosettes: layout.rosette_indices().collect(),
        }
    }
}
