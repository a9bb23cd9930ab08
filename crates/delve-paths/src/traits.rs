use delve_core::Point;

/// A grid graph: which cells can be entered from `p`.
pub trait Pather {
    /// Push the cells reachable in one step from `p` onto `out`. `out` is
    /// empty on entry.
    fn neighbors(&self, p: Point, out: &mut Vec<Point>);
}

/// A grid graph with step costs.
pub trait WeightedPather: Pather {
    /// Price of stepping from `from` into the neighbouring cell `to`; at
    /// least 1.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// A weighted graph that can guide A*.
pub trait AstarPather: WeightedPather {
    /// Lower bound on the price of any route from `from` to `to`.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
