//! Core data model types for peakmatch.
//!
//! These are the types the engine, the history store and the front end share:
//! the dataset being played, the tiles on the board and the running counters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One pair the player has to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier shared by the two tiles of this item. Unique per dataset.
    pub id: u32,
    /// Label shown in the left column.
    pub left: String,
    /// Label shown in the right column.
    pub right: String,
    /// Extra text shown next to the left label (e.g. a mountain's height).
    #[serde(default)]
    pub detail: Option<String>,
}

impl Item {
    pub fn new(id: u32, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            id,
            left: left.into(),
            right: right.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// An ordered collection of items plus the column headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique identifier for this dataset.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Heading of the left column.
    #[serde(default = "default_left_title")]
    pub left_title: String,
    /// Heading of the right column.
    #[serde(default = "default_right_title")]
    pub right_title: String,
    /// Items in left-column order.
    #[serde(default)]
    pub items: Vec<Item>,
}

pub(crate) fn default_left_title() -> String {
    "Left".to_string()
}

pub(crate) fn default_right_title() -> String {
    "Right".to_string()
}

impl Dataset {
    /// The built-in "Peak Knowledge" dataset: the ten mountains and where
    /// they are.
    pub fn mountains() -> Self {
        let peaks = [
            (1, "Mount Everest", "8,848 m", "Nepal / China"),
            (2, "Aconcagua", "6,961 m", "Argentina"),
            (3, "Denali", "6,190 m", "United States"),
            (4, "Mount Kilimanjaro", "5,895 m", "Tanzania"),
            (5, "Mount Elbrus", "5,642 m", "Russia"),
            (6, "Mount Vinson", "4,892 m", "Antarctica"),
            (7, "Puncak Jaya", "4,884 m", "Indonesia"),
            (8, "Mont Blanc", "4,807 m", "France / Italy"),
            (9, "Mount Fuji", "3,776 m", "Japan"),
            (10, "Mount Cook", "3,724 m", "New Zealand"),
        ];

        Self {
            id: "peaks".into(),
            name: "Peak Knowledge".into(),
            left_title: "Mountains".into(),
            right_title: "Locations".into(),
            items: peaks
                .into_iter()
                .map(|(id, name, height, location)| {
                    Item::new(id, name, location).with_detail(height)
                })
                .collect(),
        }
    }

    /// Number of items, which is also the minimum number of moves.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Which column a tile lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// Visual state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    #[default]
    Idle,
    Selected,
    Matched,
    Error,
}

/// Address of a tile on the board: its column and 0-based display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub side: Side,
    pub position: usize,
}

impl TileRef {
    pub fn new(side: Side, position: usize) -> Self {
        Self { side, position }
    }

    pub fn left(position: usize) -> Self {
        Self::new(Side::Left, position)
    }

    pub fn right(position: usize) -> Self {
        Self::new(Side::Right, position)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.side, self.position)
    }
}

/// One side of an item as it appears on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub item_id: u32,
    pub side: Side,
    pub state: TileState,
    /// Bumped every time the tile enters [`TileState::Error`].
    pub(crate) error_generation: u64,
}

impl Tile {
    pub(crate) fn new(item_id: u32, side: Side) -> Self {
        Self {
            item_id,
            side,
            state: TileState::Idle,
            error_generation: 0,
        }
    }
}

/// Running counters for one quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Correct pairings so far.
    pub matches: u32,
    /// Pairing attempts so far.
    pub moves: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_display_and_parse() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!("R".parse::<Side>().unwrap(), Side::Right);
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn mountains_dataset_is_well_formed() {
        let ds = Dataset::mountains();
        assert_eq!(ds.len(), 10);
        assert_eq!(ds.item(1).unwrap().right, "Nepal / China");
        assert_eq!(ds.item(9).unwrap().detail.as_deref(), Some("3,776 m"));

        let mut ids: Vec<u32> = ds.items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn tile_state_serializes_lowercase() {
        let json = serde_json::to_string(&TileState::Matched).unwrap();
        assert_eq!(json, "\"matched\"");
    }

    #[test]
    fn dataset_serde_defaults_titles() {
        let ds: Dataset = serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(ds.left_title, "Left");
        assert_eq!(ds.right_title, "Right");
        assert!(ds.is_empty());
    }
}
