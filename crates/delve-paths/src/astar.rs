use std::cmp::Reverse;
use std::collections::BinaryHeap;

use delve_core::Point;

use crate::PathRange;
use crate::pathrange::{Slot, UNREACHABLE};
use crate::traits::AstarPather;

impl PathRange {
    /// Cheapest path from `from` to `to` using A*.
    ///
    /// Returns the full path, both endpoints included, or `None` when `to`
    /// cannot be reached inside the current range. Equal-rank cells are
    /// expanded lowest index first, so results are reproducible.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;
        let stamp = self.begin_search();

        let rank = pather.estimate(from, to);
        self.slots[start] = Slot {
            stamp,
            cost: 0,
            rank,
            came_from: None,
            closed: false,
        };
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((rank, start)));

        let mut scratch = std::mem::take(&mut self.scratch);
        let mut reached = false;

        while let Some(Reverse((rank, i))) = frontier.pop() {
            let here = self.slot(i);
            // Superseded by a cheaper push, or already expanded.
            if here.closed || rank != here.rank {
                continue;
            }
            if i == goal {
                reached = true;
                break;
            }
            self.slots[i].closed = true;

            let p = self.point_at(i);
            scratch.clear();
            pather.neighbors(p, &mut scratch);
            for &q in &scratch {
                let Some(j) = self.index_of(q) else {
                    continue;
                };
                let cost = here.cost.saturating_add(pather.cost(p, q));
                let next = self.slot(j);
                if cost >= next.cost {
                    continue;
                }
                let rank = cost.saturating_add(pather.estimate(q, to));
                self.slots[j] = Slot {
                    stamp,
                    cost,
                    rank,
                    came_from: Some(i),
                    closed: false,
                };
                frontier.push(Reverse((rank, j)));
            }
        }
        self.scratch = scratch;

        if !reached {
            return None;
        }
        let mut path = vec![to];
        let mut at = self.slots[goal].came_from;
        while let Some(i) = at {
            path.push(self.point_at(i));
            at = self.slots[i].came_from;
        }
        path.reverse();
        Some(path)
    }

    /// Cost of the last path found to `to`, or [`UNREACHABLE`] if the last
    /// search did not reach it.
    pub fn astar_cost(&self, to: Point) -> i32 {
        self.index_of(to)
            .map(|i| self.slot(i).cost)
            .unwrap_or(UNREACHABLE)
    }
}
