//! Player field of view and the explored memory.

use delve_core::Point;
use delve_rl::Fov;

use crate::gamemap::GameMap;

/// Recompute `visible` from `origin` within `radius`, then fold it into
/// `explored`. `visible` is rebuilt from scratch; `explored` only grows.
pub fn update_fov(map: &mut GameMap, origin: Point, radius: i32) {
    let mut fov = Fov::new(map.bounds());
    let tiles = &map.tiles;
    fov.cast_circular(origin, radius, |p| tiles.at(p).is_some_and(|t| t.transparent));

    map.visible.fill(false);
    for p in fov.cells() {
        map.visible.set(p, true);
    }
    map.explored.union_with(&map.visible);
}
