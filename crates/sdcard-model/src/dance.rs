//! Closed enumerations for what a calling program prints about a square.
//!
//! Every external token has a total lookup: dancers and facings are only
//! recognized from their exact labels, levels fall back to [`Level::All`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// One of the eight people in the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dancer {
    #[serde(rename = "1B")]
    B1,
    #[serde(rename = "1G")]
    G1,
    #[serde(rename = "2B")]
    B2,
    #[serde(rename = "2G")]
    G2,
    #[serde(rename = "3B")]
    B3,
    #[serde(rename = "3G")]
    G3,
    #[serde(rename = "4B")]
    B4,
    #[serde(rename = "4G")]
    G4,
}

impl Dancer {
    pub const ALL: [Dancer; 8] = [
        Dancer::B1,
        Dancer::G1,
        Dancer::B2,
        Dancer::G2,
        Dancer::B3,
        Dancer::G3,
        Dancer::B4,
        Dancer::G4,
    ];

    /// The two-character label used in formation diagrams.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dancer::B1 => "1B",
            Dancer::G1 => "1G",
            Dancer::B2 => "2B",
            Dancer::G2 => "2G",
            Dancer::B3 => "3B",
            Dancer::G3 => "3G",
            Dancer::B4 => "4B",
            Dancer::G4 => "4G",
        }
    }

    /// Looks up a dancer by its exact diagram label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dancer| dancer.as_str() == label)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dancer {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ModelError::UnknownDancer(s.to_string()))
    }
}

/// Facing direction; couple #1 starts facing back, #2 left, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    #[serde(rename = "^")]
    Back,
    #[serde(rename = "<")]
    Left,
    #[serde(rename = "V")]
    Front,
    #[serde(rename = ">")]
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Back, Facing::Left, Facing::Front, Facing::Right];

    pub fn glyph(&self) -> char {
        match self {
            Facing::Back => '^',
            Facing::Left => '<',
            Facing::Front => 'V',
            Facing::Right => '>',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|facing| facing.glyph() == glyph)
    }
}

impl TryFrom<char> for Facing {
    type Error = ModelError;

    fn try_from(glyph: char) -> Result<Self, Self::Error> {
        Self::from_glyph(glyph).ok_or(ModelError::UnknownFacing(glyph))
    }
}

/// Where a dancer stands, in character cells of the decoded diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub facing: Facing,
    pub row: usize,
    pub col: usize,
}

/// A position for every dancer in the square.
///
/// There is no way to build a partial formation: either all eight dancers
/// are placed or there is no formation at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    positions: [Position; 8],
}

impl Formation {
    /// Builds a formation if `positions` places all eight dancers.
    pub fn from_positions(positions: &BTreeMap<Dancer, Position>) -> Option<Self> {
        let mut placed = [None; 8];
        for (dancer, position) in positions {
            placed[dancer.index()] = Some(*position);
        }
        let mut out = [Position {
            facing: Facing::Back,
            row: 0,
            col: 0,
        }; 8];
        for (slot, position) in out.iter_mut().zip(placed) {
            *slot = position?;
        }
        Some(Self { positions: out })
    }

    pub fn get(&self, dancer: Dancer) -> &Position {
        &self.positions[dancer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dancer, &Position)> {
        Dancer::ALL.into_iter().zip(self.positions.iter())
    }

    /// Number of diagram rows spanned by the dancers.
    pub fn height(&self) -> usize {
        self.positions
            .iter()
            .map(|position| position.row + 1)
            .max()
            .unwrap_or(0)
    }
}

/// One danced instruction, with whatever the program printed about it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Call {
    /// The call itself, without a leading `{ ... }` comment.
    pub call: String,
    /// Leading comment, or empty.
    pub comment: String,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation: Option<Formation>,
    /// The actual formation is rotated 45 degrees from the picture.
    pub rotated45: bool,
}

impl Call {
    pub fn new(call: impl Into<String>) -> Self {
        Self {
            call: call.into(),
            ..Self::default()
        }
    }
}

/// Difficulty tier, as printed in the transcript header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "MS")]
    Mainstream,
    #[serde(rename = "Plus")]
    Plus,
    A1,
    A2,
    C1,
    C2,
    C3A,
    C3B,
    C4,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl Level {
    pub const ALL: [Level; 10] = [
        Level::Mainstream,
        Level::Plus,
        Level::A1,
        Level::A2,
        Level::C1,
        Level::C2,
        Level::C3A,
        Level::C3B,
        Level::C4,
        Level::All,
    ];

    /// The label as it appears in a transcript header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Mainstream => "MS",
            Level::Plus => "Plus",
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::C1 => "C1",
            Level::C2 => "C2",
            Level::C3A => "C3A",
            Level::C3B => "C3B",
            Level::C4 => "C4",
            Level::All => "all",
        }
    }

    /// Total lookup: unknown labels map to [`Level::All`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == label)
            .unwrap_or(Level::All)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
