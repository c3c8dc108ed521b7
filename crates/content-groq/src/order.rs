//! Result ordering.

use std::fmt;

use crate::FieldPath;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One sort key inside `order(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: FieldPath,
    pub direction: Direction,
}

impl Ordering {
    pub fn new(field: FieldPath, direction: Direction) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: FieldPath) -> Self {
        Self::new(field, Direction::Asc)
    }

    pub fn desc(field: FieldPath) -> Self {
        Self::new(field, Direction::Desc)
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_str())
    }
}
