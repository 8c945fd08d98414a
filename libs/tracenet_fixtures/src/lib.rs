//! Planar trace fixtures, given as WKT `LINESTRING`s in metres.
//!
//! Each constant is a single trace. Grouped arrays describe the traces a
//! topology is built from; the `*_QUERY` constants are traces to match.

/// A straight east-bound trace, 1km long, sampled every 100m.
pub const STRAIGHT: &str = "LINESTRING (0 0, 100 0, 200 0, 300 0, 400 0, 500 0, 600 0, 700 0, 800 0, 900 0, 1000 0)";

/// The south-north arm of the cross.
pub const CROSS_NORTH_SOUTH: &str =
    "LINESTRING (0 -500, 0 -250, 0 -100, 0 0, 0 100, 0 250, 0 500)";

/// The west-east arm of the cross.
pub const CROSS_WEST_EAST: &str =
    "LINESTRING (-500 0, -250 0, -100 0, 0 0, 100 0, 250 0, 500 0)";

/// Both arms of the cross, crossing at the origin.
pub const CROSS: [&str; 2] = [CROSS_NORTH_SOUTH, CROSS_WEST_EAST];

/// Travels south along the northern arm of the cross, stopping short of the junction.
pub const CROSS_NORTH_QUERY: &str = "LINESTRING (1 470, 0 400, -1 330, 0 260, 1 190, 0 120, 0 80)";

/// A noisy copy of [`STRAIGHT`].
pub const STRAIGHT_NOISY_QUERY: &str = "LINESTRING (0 1, 90 -2, 210 2, 310 -1, 390 1, 505 -2, 600 2, 695 0, 810 -1, 900 1, 1000 0)";

/// Three horizontal and three vertical traces forming a 2km square grid.
pub const GRID: [&str; 6] = [
    "LINESTRING (0 0, 500 0, 1000 0, 1500 0, 2000 0)",
    "LINESTRING (0 1000, 500 1000, 1000 1000, 1500 1000, 2000 1000)",
    "LINESTRING (0 2000, 500 2000, 1000 2000, 1500 2000, 2000 2000)",
    "LINESTRING (0 0, 0 500, 0 1000, 0 1500, 0 2000)",
    "LINESTRING (1000 0, 1000 500, 1000 1000, 1000 1500, 1000 2000)",
    "LINESTRING (2000 0, 2000 500, 2000 1000, 2000 1500, 2000 2000)",
];

/// Drives east along the bottom of the grid, then north up the middle column.
pub const GRID_L_QUERY: &str = "LINESTRING (50 2, 250 -1, 450 1, 650 0, 850 -2, 998 1, 1001 150, 999 350, 1002 550, 1000 750, 998 950)";

/// Two traces that never come near each other.
pub const DISJOINT: [&str; 2] = [
    "LINESTRING (0 0, 400 0)",
    "LINESTRING (0 5000, 400 5000)",
];

/// Two overlapping recordings of the same east-bound road, offset by a few metres.
pub const OVERLAPPING: [&str; 2] = [
    "LINESTRING (0 0, 250 1, 500 0, 750 -1, 1000 0)",
    "LINESTRING (0 4, 250 3, 500 5, 750 4, 1000 3)",
];

/// One east-bound road with a 200m gap in its middle.
pub const SPLIT: [&str; 2] = ["LINESTRING (0 0, 400 0)", "LINESTRING (600 0, 1000 0)"];

/// Travels the length of [`SPLIT`], across its gap.
pub const SPLIT_QUERY: &str = "LINESTRING (0 0, 1000 0)";
