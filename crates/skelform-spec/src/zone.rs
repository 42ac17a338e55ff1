//! Body zones and their naming/coloring conventions.

use serde::{Deserialize, Serialize};

/// The body zone a module belongs to.
///
/// The zone determines the prefix of every node name the module creates
/// and which color source its root subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Left side of the body (`L_` prefix).
    Left,
    /// Right side of the body (`R_` prefix).
    Right,
    /// Center line (no prefix).
    #[default]
    Center,
}

impl Zone {
    /// Returns the node-name prefix for this zone.
    pub fn prefix(&self) -> &'static str {
        match self {
            Zone::Left => "L_",
            Zone::Right => "R_",
            Zone::Center => "",
        }
    }

    /// Returns the zone as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Left => "left",
            Zone::Right => "right",
            Zone::Center => "center",
        }
    }

    /// Returns the name of the color attribute this zone subscribes to.
    pub fn color_attr(&self) -> &'static str {
        match self {
            Zone::Left => "left_color",
            Zone::Right => "right_color",
            Zone::Center => "center_color",
        }
    }

    /// Returns all zones.
    pub fn all() -> &'static [Zone] {
        &[Zone::Left, Zone::Right, Zone::Center]
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
