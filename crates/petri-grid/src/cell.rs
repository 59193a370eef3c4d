//! Binary cell state.

/// The state of a single grid cell.
///
/// Represented as `u8` (Dead = 0, Alive = 1) so that a live-neighbor count
/// is just a sum of cell values.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Unpopulated cell.
    #[default]
    Dead = 0,
    /// Populated cell.
    Alive = 1,
}

impl Cell {
    /// Whether this cell is [`Cell::Alive`].
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }

    /// The opposite state. Callers implementing click-to-toggle read the
    /// current state and set `cell.toggled()`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}
