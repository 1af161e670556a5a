//! # Support Faces
//!
//! Named faces of the design box that can be held fixed.

use crate::error::OptimizerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A face of the design domain whose boundary layer of cells is fixed solid.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::Face;
///
/// let face: Face = "bottom".parse().unwrap();
/// assert_eq!(face, Face::Bottom);
/// assert!("front".parse::<Face>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// `z = 0`
    Bottom,
    /// `z = nz - 1`
    Top,
    /// `x = 0`
    Left,
    /// `x = nx - 1`
    Right,
}

impl Face {
    /// All supported faces.
    pub const ALL: [Face; 4] = [Face::Bottom, Face::Top, Face::Left, Face::Right];

    /// Lowercase name of the face.
    pub fn name(self) -> &'static str {
        match self {
            Face::Bottom => "bottom",
            Face::Top => "top",
            Face::Left => "left",
            Face::Right => "right",
        }
    }

    /// Parses a list of face names, failing on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Face>, OptimizerError> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl FromStr for Face {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|face| face.name() == s)
            .ok_or_else(|| {
                OptimizerError::invalid(
                    "fixed_faces",
                    format!("unknown face '{s}', expected one of bottom, top, left, right"),
                )
            })
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
