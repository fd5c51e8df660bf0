/// Planar ground position in metres, relative to the aerodrome reference
/// point. The radar view works on a local plane, so no geodesy is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Returns the point `ratio` of the way toward `other`, with `ratio`
    /// expected in `[0, 1]`.
    pub fn towards(&self, other: &Position, ratio: f64) -> Position {
        Position {
            x: self.x + ratio * (other.x - self.x),
            y: self.y + ratio * (other.y - self.y),
        }
    }
}
