//! Quadrant identities within a parent node and the four edge directions.

/// Position of a child node inside its parent's footprint.
///
/// The discriminant doubles as the child slot: bit 0 is set for the right
/// half, bit 1 for the top half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Lower-left quarter, at the parent's own corner.
    BottomLeft = 0,
    /// Lower-right quarter.
    BottomRight = 1,
    /// Upper-left quarter.
    TopLeft = 2,
    /// Upper-right quarter.
    TopRight = 3,
}

impl Quadrant {
    /// Child order used throughout the tree.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
        Quadrant::TopLeft,
        Quadrant::TopRight,
    ];

    const RIGHT_BIT: u8 = 0b01;
    const TOP_BIT: u8 = 0b10;

    /// Child slot index (0..4).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Quadrant::index`]. Only the low two bits are read.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index & 0b11]
    }

    /// Whether this quadrant lies in the right half of its parent.
    #[must_use]
    pub fn is_right(self) -> bool {
        (self as u8) & Self::RIGHT_BIT != 0
    }

    /// Whether this quadrant lies in the top half of its parent.
    #[must_use]
    pub fn is_top(self) -> bool {
        (self as u8) & Self::TOP_BIT != 0
    }

    /// Offset of this quadrant's lower corner, in units of the child size.
    #[must_use]
    pub fn offset(self) -> (f64, f64) {
        (
            if self.is_right() { 1.0 } else { 0.0 },
            if self.is_top() { 1.0 } else { 0.0 },
        )
    }

    /// The quadrant reached by crossing the parent's midline toward `side`.
    ///
    /// Both the direct sibling and the mirrored child on the far side of
    /// an edge are this quadrant: crossing an edge always flips exactly one
    /// axis bit.
    #[must_use]
    pub fn mirrored(self, side: Side) -> Self {
        Self::from_index((self as usize) ^ side.axis_bit() as usize)
    }
}

/// One of the four edges of a square node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Increasing Y (world +Z).
    Top,
    /// Decreasing Y (world -Z).
    Bottom,
    /// Decreasing X.
    Left,
    /// Increasing X.
    Right,
}

/// How a node reaches its same-size neighbor across one of its edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// The neighbor is the sibling in this quadrant of the same parent.
    Sibling(Quadrant),
    /// The edge lies on the parent's boundary; resolve the parent's
    /// neighbor first, then descend into this quadrant of it.
    Outside(Quadrant),
}

impl Side {
    /// All four sides, in stitch-mask bit order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Bit position of this side in a stitch mask.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Bottom => 1,
            Side::Left => 2,
            Side::Right => 3,
        }
    }

    /// The side facing back across the shared edge.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn axis_bit(self) -> u8 {
        match self {
            Side::Top | Side::Bottom => Quadrant::TOP_BIT,
            Side::Left | Side::Right => Quadrant::RIGHT_BIT,
        }
    }

    fn is_positive(self) -> bool {
        matches!(self, Side::Top | Side::Right)
    }

    /// Classify the edge of a child in `quadrant` facing this side.
    ///
    /// A child already sitting on the parent's edge in this direction must
    /// look outside the parent; otherwise its neighbor is a sibling.
    #[must_use]
    pub fn crossing(self, quadrant: Quadrant) -> Crossing {
        let on_edge = ((quadrant as u8) & self.axis_bit() != 0) == self.is_positive();
        let target = quadrant.mirrored(self);
        if on_edge {
            Crossing::Outside(target)
        } else {
            Crossing::Sibling(target)
        }
    }
}
