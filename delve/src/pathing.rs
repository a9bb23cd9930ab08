//! Monster pathfinding over the map's walkable cells.
//!
//! Cells held by a blocking entity stay passable but cost more, so monsters
//! prefer free routes yet still queue through a crowded corridor.

use delve_core::{Grid, Point};
use delve_paths::{AstarPather, PathRange, Pather, WeightedPather, octile};

use crate::config::PathCosts;
use crate::gamemap::GameMap;

/// Per-cell entry cost: 0 for walls, 1 for floor, plus the crowd penalty
/// where a blocking entity stands.
pub fn cost_grid(map: &GameMap, crowd_penalty: i32) -> Grid<i32> {
    let mut costs = Grid::new(map.width(), map.height(), 0);
    for (p, t) in map.tiles().iter() {
        if t.walkable {
            costs.set(p, 1);
        }
    }
    for e in map.entities() {
        if !e.blocks_movement {
            continue;
        }
        if let Some(c) = costs.at_mut(e.pos) {
            if *c > 0 {
                *c += crowd_penalty;
            }
        }
    }
    costs
}

struct CrowdPather<'a> {
    costs: &'a Grid<i32>,
    weights: PathCosts,
}

impl Pather for CrowdPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for q in p.neighbors_8() {
            if self.costs.at(q).is_some_and(|&c| c > 0) {
                buf.push(q);
            }
        }
    }
}

impl WeightedPather for CrowdPather<'_> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        let step = if from.is_diagonal_step(to) {
            self.weights.diagonal
        } else {
            self.weights.cardinal
        };
        self.costs.at(to).copied().unwrap_or(0) * step
    }
}

impl AstarPather for CrowdPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        octile(from, to, self.weights.cardinal, self.weights.diagonal)
    }
}

/// Cells to walk from `from` to `to`, excluding `from`. Empty when there is
/// no route.
pub fn path_to(map: &GameMap, from: Point, to: Point, weights: &PathCosts) -> Vec<Point> {
    let costs = cost_grid(map, weights.crowd_penalty);
    let pather = CrowdPather {
        costs: &costs,
        weights: *weights,
    };
    let mut pr = PathRange::new(map.bounds());
    match pr.astar_path(&pather, from, to) {
        Some(mut path) => {
            path.remove(0);
            path
        }
        None => Vec::new(),
    }
}

/// Weighted length of a step sequence starting next to `from`.
pub fn path_cost(map: &GameMap, from: Point, path: &[Point], weights: &PathCosts) -> i32 {
    let costs = cost_grid(map, weights.crowd_penalty);
    let pather = CrowdPather {
        costs: &costs,
        weights: *weights,
    };
    let mut prev = from;
    let mut total = 0;
    for &p in path {
        total += pather.cost(prev, p);
        prev = p;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CROWD_PENALTY;
    use crate::entity::{EntityIds, MapId, prototypes};
    use crate::testing;
    use crate::tile;
    use delve_core::Range;

    fn assert_walk(from: Point, path: &[Point], to: Point) {
        assert_eq!(path.last(), Some(&to));
        let mut prev = from;
        for &p in path {
            assert!(prev.is_adjacent(p), "{prev} -> {p} is not a step");
            prev = p;
        }
    }

    #[test]
    fn every_reachable_cell_has_a_path() {
        let mut map = testing::open_map(MapId(0), 9, 7);
        map.fill_area(Range::new(4, 1, 5, 5), tile::WALL);
        let from = Point::new(1, 1);
        let weights = PathCosts::default();
        for to in map.bounds().iter() {
            if to == from || !map.walkable(to) {
                continue;
            }
            let path = path_to(&map, from, to, &weights);
            assert!(!path.is_empty(), "no path to {to}");
            assert!(!path.contains(&from));
            assert_walk(from, &path, to);
        }
    }

    #[test]
    fn walled_off_cell_is_unreachable() {
        let mut map = testing::open_map(MapId(0), 9, 9);
        map.fill_area(Range::new(5, 5, 8, 8), tile::WALL);
        map.set_tile(Point::new(6, 6), tile::FLOOR);
        let path = path_to(&map, Point::new(1, 1), Point::new(6, 6), &PathCosts::default());
        assert!(path.is_empty());
    }

    #[test]
    fn wall_target_and_same_cell_give_nothing() {
        let map = testing::open_map(MapId(0), 6, 6);
        let w = PathCosts::default();
        assert!(path_to(&map, Point::new(1, 1), Point::new(0, 0), &w).is_empty());
        assert!(path_to(&map, Point::new(1, 1), Point::new(1, 1), &w).is_empty());
    }

    #[test]
    fn crowded_corridor_is_still_passable() {
        // A single-width corridor from (1, 1) to (7, 1).
        let mut map = testing::open_map(MapId(0), 9, 3);
        let mut ids = EntityIds::default();
        let from = Point::new(1, 1);
        let to = Point::new(7, 1);
        let w = PathCosts::default();

        let clear = path_to(&map, from, to, &w);
        let clear_cost = path_cost(&map, from, &clear, &w);

        map.spawn(&mut ids, &prototypes::orc(), Point::new(4, 1));
        let crowded = path_to(&map, from, to, &w);
        assert_walk(from, &crowded, to);
        assert!(crowded.contains(&Point::new(4, 1)));
        assert!(path_cost(&map, from, &crowded, &w) > clear_cost);
        assert_eq!(path_cost(&map, from, &crowded, &w), clear_cost + 2 * w.crowd_penalty);
    }

    #[test]
    fn blocker_causes_a_detour_when_one_exists() {
        // Two parallel lanes: y = 1 and y = 2.
        let mut map = testing::open_map(MapId(0), 11, 4);
        let mut ids = EntityIds::default();
        let from = Point::new(1, 1);
        let to = Point::new(9, 1);
        let w = PathCosts::default();

        let clear = path_to(&map, from, to, &w);
        assert!(clear.iter().all(|p| p.y == 1));

        map.spawn(&mut ids, &prototypes::orc(), Point::new(5, 1));
        let detour = path_to(&map, from, to, &w);
        assert_walk(from, &detour, to);
        assert!(!detour.contains(&Point::new(5, 1)));
    }

    #[test]
    fn non_blocking_entities_cost_nothing() {
        let mut map = testing::open_map(MapId(0), 9, 3);
        let mut ids = EntityIds::default();
        map.spawn(&mut ids, &prototypes::health_potion(), Point::new(4, 1));
        let costs = cost_grid(&map, CROWD_PENALTY);
        assert_eq!(costs.at(Point::new(4, 1)), Some(&1));
        assert_eq!(costs.at(Point::new(0, 0)), Some(&0));
    }

    #[test]
    fn blocker_in_a_wall_adds_nothing() {
        let mut map = testing::open_map(MapId(0), 5, 5);
        let mut ids = EntityIds::default();
        map.spawn(&mut ids, &prototypes::orc(), Point::new(0, 2));
        let costs = cost_grid(&map, CROWD_PENALTY);
        assert_eq!(costs.at(Point::new(0, 2)), Some(&0));
    }
}
