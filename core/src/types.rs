use smallvec::SmallVec;

/// Single coordinate axis used for pitch height, width, and positions.
pub type Coord = u8;

/// Count type used for cell totals.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`; `x` runs over rows (height), `y`
/// over columns (width).
pub type Coord2 = (Coord, Coord);

/// Elapsed play time as `[hours, minutes, seconds]`, handed through to the
/// presentation layer untouched.
pub type ClockTime = [u32; 3];

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Enumerates the up-to-8 in-bounds neighbors of `center` on a
/// `bounds.0 × bounds.1` pitch. Corner cells get 3, edge cells 5, interior
/// cells 8.
pub fn adjacent_coords(center: Coord2, bounds: Coord2) -> SmallVec<[Coord2; 8]> {
    DISPLACEMENTS
        .iter()
        .filter_map(|&delta| apply_delta(center, delta, bounds))
        .collect()
}
