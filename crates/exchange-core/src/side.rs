//! Side (Buy / Sell) of a resting order or book.

/// Order side: Buy (bid book) or Sell (ask book).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Convert to the wire char representation (`'B'` / `'S'`).
    pub fn as_char(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    /// Try to parse from a char (`'B'` / `'S'`, case-sensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }

    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether an incoming order at `incoming` crosses a resting order
    /// at `resting` on the opposite side.
    pub fn crosses(self, incoming: u32, resting: u32) -> bool {
        match self {
            Side::Buy => incoming >= resting,
            Side::Sell => incoming <= resting,
        }
    }
}
