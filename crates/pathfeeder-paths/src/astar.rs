use std::collections::BinaryHeap;

use pathfeeder_core::Point;

use crate::pathrange::{NO_PARENT, NodeRef, SearchOptions, SearchStats};
use crate::traits::AstarPather;
use crate::{Path, PathRange};

impl PathRange {
    /// Compute a lowest-cost path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if either
    /// endpoint lies outside the range or `to` cannot be reached. An
    /// unreachable destination costs a full exploration of every cell
    /// reachable from `from`.
    ///
    /// Every call starts a new generation, even when it returns early.
    /// Neighbors that are not 4-adjacent to the expanding cell are ignored,
    /// so the result is always a contiguous path.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        opts: SearchOptions,
    ) -> Option<Path> {
        self.stats = SearchStats::default();
        let cur_gen = self.next_generation();

        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = i64::from(pather.estimate(from, to));
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }

        if start_idx == goal_idx {
            return Some(Path::single(from));
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq: u32 = 0;
        open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq,
        });
        let mut stats = SearchStats {
            expanded: 0,
            pushed: 1,
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale entries: closed cells and superseded admissions.
            {
                let cn = &self.nodes[ci];
                if cn.generation != cur_gen || !cn.open || current.f > cn.f {
                    continue;
                }
            }

            self.nodes[ci].open = false;
            stats.expanded += 1;

            if ci == goal_idx {
                if opts.exhaustive {
                    continue;
                }
                break;
            }

            let current_g = self.nodes[ci].g;
            let parent = self.nodes[ci].parent;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if !current_point.is_adjacent_4(np) || (opts.skip_predecessor && ni == parent) {
                    continue;
                }
                let tentative_g =
                    current_g.saturating_add(i64::from(pather.cost(current_point, np)));

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.f = tentative_g.saturating_add(i64::from(pather.estimate(np, to)));
                n.parent = ci;
                n.open = true;

                seq = seq.wrapping_add(1);
                open.push(NodeRef { idx: ni, f: n.f, seq });
                stats.pushed += 1;
            }
        }

        self.nbuf = nbuf;
        self.stats = stats;

        let path = self.extract_path(from, to);
        log::trace!(
            "astar {} -> {}: {} ({} expanded, {} pushed)",
            from,
            to,
            match &path {
                Some(p) => format!("{} vertices", p.len()),
                None => "unreachable".to_string(),
            },
            stats.expanded,
            stats.pushed
        );
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::traits::{Pather, WeightedPather};
    use pathfeeder_core::Range;
    use std::collections::HashSet;

    /// Open grid with optional walls and per-cell entry costs.
    struct TestPather {
        rng: Range,
        walls: HashSet<Point>,
        weights: Vec<i32>,
    }

    impl TestPather {
        fn open(w: i32, h: i32) -> Self {
            let rng = Range::sized(w, h);
            Self {
                rng,
                walls: HashSet::new(),
                weights: vec![1; rng.len()],
            }
        }

        fn from_rows(rows: &[&str]) -> Self {
            let h = rows.len() as i32;
            let w = rows[0].len() as i32;
            let mut tp = Self::open(w, h);
            for (y, row) in rows.iter().enumerate() {
                for (x, ch) in row.chars().enumerate() {
                    let p = Point::new(x as i32, y as i32);
                    match ch {
                        '#' => {
                            tp.walls.insert(p);
                        }
                        d => tp.set_weight(p, d.to_digit(10).unwrap_or(1) as i32),
                    }
                }
            }
            tp
        }

        fn set_weight(&mut self, p: Point, w: i32) {
            let i = (p.y * self.rng.width() + p.x) as usize;
            self.weights[i] = w;
        }

        fn weight(&self, p: Point) -> i32 {
            self.weights[(p.y * self.rng.width() + p.x) as usize]
        }

        fn passable(&self, p: Point) -> bool {
            self.rng.contains(p) && !self.walls.contains(&p)
        }

        fn path_cost(&self, path: &Path) -> i64 {
            path.as_slice()[1..]
                .iter()
                .map(|&p| i64::from(self.weight(p)))
                .sum()
        }

        /// Reference uniform-cost search returning the optimal cost.
        fn dijkstra_cost(&self, from: Point, to: Point) -> Option<i64> {
            use std::cmp::Reverse;
            let mut dist = vec![i64::MAX; self.rng.len()];
            let idx = |p: Point| (p.y * self.rng.width() + p.x) as usize;
            let mut heap = BinaryHeap::new();
            dist[idx(from)] = 0;
            heap.push(Reverse((0i64, from.x, from.y)));
            while let Some(Reverse((d, x, y))) = heap.pop() {
                let p = Point::new(x, y);
                if d > dist[idx(p)] {
                    continue;
                }
                if p == to {
                    return Some(d);
                }
                for n in p.neighbors_4() {
                    if !self.passable(n) {
                        continue;
                    }
                    let nd = d + i64::from(self.weight(n));
                    if nd < dist[idx(n)] {
                        dist[idx(n)] = nd;
                        heap.push(Reverse((nd, n.x, n.y)));
                    }
                }
            }
            None
        }
    }

    impl Pather for TestPather {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            buf.extend(p.neighbors_4().into_iter().filter(|&n| self.passable(n)));
        }
    }

    impl WeightedPather for TestPather {
        fn cost(&self, _from: Point, to: Point) -> i32 {
            self.weight(to)
        }
    }

    impl AstarPather for TestPather {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    fn search(tp: &TestPather, from: Point, to: Point, opts: SearchOptions) -> Option<Path> {
        let mut pr = PathRange::new(tp.rng);
        pr.astar_path(tp, from, to, opts)
    }

    #[test]
    fn straight_line() {
        let tp = TestPather::open(10, 1);
        let path = search(&tp, Point::new(0, 0), Point::new(9, 0), SearchOptions::default()).unwrap();
        assert_eq!(path.len(), 10);
        assert_eq!(path.first(), Point::new(0, 0));
        assert_eq!(path.last(), Point::new(9, 0));
        assert!(path.is_contiguous());
    }

    #[test]
    fn open_grid_length_is_manhattan_plus_one() {
        let tp = TestPather::open(5, 5);
        let path = search(&tp, Point::new(0, 0), Point::new(4, 4), SearchOptions::default()).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.vertex(0), Some(Point::new(0, 0)));
        assert_eq!(path.vertex(8), Some(Point::new(4, 4)));
        assert!(path.is_contiguous());
    }

    #[test]
    fn around_wall() {
        let tp = TestPather::from_rows(&[
            ".....", //
            ".###.", //
            ".....", //
        ]);
        let path = search(&tp, Point::new(1, 2), Point::new(3, 0), SearchOptions::default()).unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|p| tp.passable(*p)));
    }

    #[test]
    fn same_start_and_goal() {
        let tp = TestPather::open(5, 5);
        let path = search(&tp, Point::new(2, 2), Point::new(2, 2), SearchOptions::default()).unwrap();
        assert_eq!(path.as_slice(), &[Point::new(2, 2)]);
    }

    #[test]
    fn enclosed_destination_is_unreachable() {
        let tp = TestPather::from_rows(&[
            ".....", //
            "..#..", //
            ".#.#.", //
            "..#..", //
        ]);
        let mut pr = PathRange::new(tp.rng);
        assert!(pr.astar_path(&tp, Point::new(0, 0), Point::new(2, 2), SearchOptions::default()).is_none());
        // Every reachable cell was explored before giving up.
        assert_eq!(pr.last_stats().expanded, 20 - 5);
    }

    #[test]
    fn walled_column_blocks_everything() {
        let tp = TestPather::from_rows(&[
            "..#..", //
            "..#..", //
            "..#..", //
            "..#..", //
            "..#..", //
        ]);
        assert!(search(&tp, Point::new(0, 0), Point::new(4, 4), SearchOptions::default()).is_none());
    }

    #[test]
    fn out_of_range_endpoints() {
        let tp = TestPather::open(3, 3);
        let opts = SearchOptions::default();
        assert!(search(&tp, Point::new(-1, 0), Point::new(2, 2), opts).is_none());
        assert!(search(&tp, Point::new(0, 0), Point::new(3, 0), opts).is_none());
    }

    #[test]
    fn prefers_cheaper_detour() {
        // The middle row is expensive; going around costs less.
        let tp = TestPather::from_rows(&[
            "11111", //
            "19991", //
            "11111", //
        ]);
        let from = Point::new(0, 1);
        let to = Point::new(4, 1);
        let path = search(&tp, from, to, SearchOptions::default()).unwrap();
        assert_eq!(tp.path_cost(&path), 6);
        assert!(path.iter().all(|p| p.y != 1 || p.x == 0 || p.x == 4));
    }

    #[test]
    fn takes_expensive_shortcut_when_cheaper_overall() {
        // Going around the 2-cost band is longer than crossing it.
        let tp = TestPather::from_rows(&[
            "1211", //
            "1211", //
            "1211", //
            "1211", //
            "1111", //
        ]);
        let path = search(&tp, Point::new(0, 0), Point::new(3, 0), SearchOptions::default()).unwrap();
        assert_eq!(tp.path_cost(&path), 4);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn exhaustive_and_early_exit_agree() {
        let tp = TestPather::from_rows(&[
            "1119111", //
            "1#19#11", //
            "1#11#31", //
            "1#####1", //
            "1111111", //
        ]);
        let from = Point::new(0, 0);
        let to = Point::new(6, 2);
        let early = SearchOptions::default();
        let full = SearchOptions {
            exhaustive: true,
            ..early
        };
        let mut pr = PathRange::new(tp.rng);
        let a = pr.astar_path(&tp, from, to, early).unwrap();
        let early_expanded = pr.last_stats().expanded;
        let b = pr.astar_path(&tp, from, to, full).unwrap();
        assert_eq!(tp.path_cost(&a), tp.path_cost(&b));
        assert!(pr.last_stats().expanded >= early_expanded);
        assert_eq!(pr.cost_at(to), Some(tp.path_cost(&b)));
    }

    #[test]
    fn predecessor_exclusion_does_not_change_cost() {
        let tp = TestPather::from_rows(&[
            "11311", //
            "1#1#1", //
            "13121", //
            "1#1#1", //
            "11111", //
        ]);
        let from = Point::new(0, 0);
        let to = Point::new(4, 4);
        let with = search(&tp, from, to, SearchOptions::default()).unwrap();
        let without = search(
            &tp,
            from,
            to,
            SearchOptions {
                skip_predecessor: false,
                ..SearchOptions::default()
            },
        )
        .unwrap();
        assert_eq!(tp.path_cost(&with), tp.path_cost(&without));
    }

    #[test]
    fn deterministic_tie_break() {
        let tp = TestPather::open(4, 4);
        let a = search(&tp, Point::new(0, 0), Point::new(3, 3), SearchOptions::default()).unwrap();
        let b = search(&tp, Point::new(0, 0), Point::new(3, 3), SearchOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reused_range_does_not_leak_previous_search() {
        let mut tp = TestPather::open(5, 1);
        let mut pr = PathRange::new(tp.rng);
        assert!(pr.astar_path(&tp, Point::new(0, 0), Point::new(4, 0), SearchOptions::default()).is_some());
        tp.walls.insert(Point::new(2, 0));
        assert!(pr.astar_path(&tp, Point::new(0, 0), Point::new(4, 0), SearchOptions::default()).is_none());
        assert_eq!(pr.cost_at(Point::new(4, 0)), None);
    }

    #[test]
    fn early_returns_still_start_a_new_search() {
        let tp = TestPather::open(5, 5);
        let mut pr = PathRange::new(tp.rng);
        let opts = SearchOptions::default();
        let from = Point::new(0, 0);
        let goal = Point::new(4, 0);
        assert!(pr.astar_path(&tp, from, goal, opts).is_some());
        assert_eq!(pr.cost_at(goal), Some(4));

        let here = Point::new(2, 2);
        assert_eq!(pr.astar_path(&tp, here, here, opts), Some(Path::single(here)));
        assert_eq!(pr.cost_at(goal), None);
        assert_eq!(pr.cost_at(here), Some(0));
        assert!(pr.extract_path(from, goal).is_none());

        assert!(pr.astar_path(&tp, from, goal, opts).is_some());
        assert!(pr.astar_path(&tp, from, Point::new(9, 9), opts).is_none());
        assert_eq!(pr.cost_at(goal), None);
        assert_eq!(pr.last_stats(), SearchStats::default());
    }

    /// Offers every cell of the grid as a neighbor, adjacent or not.
    struct Teleporter(Range);

    impl Pather for Teleporter {
        fn neighbors(&self, _p: Point, buf: &mut Vec<Point>) {
            buf.extend(self.0);
        }
    }

    impl WeightedPather for Teleporter {
        fn cost(&self, _from: Point, _to: Point) -> i32 {
            1
        }
    }

    impl AstarPather for Teleporter {
        fn estimate(&self, _from: Point, _to: Point) -> i32 {
            0
        }
    }

    #[test]
    fn non_adjacent_neighbors_are_ignored() {
        let rng = Range::sized(5, 5);
        let mut pr = PathRange::new(rng);
        let path = pr
            .astar_path(&Teleporter(rng), Point::new(0, 0), Point::new(4, 4), SearchOptions::default())
            .unwrap();
        assert!(path.is_contiguous());
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn huge_costs_do_not_collapse() {
        let mut tp = TestPather::from_rows(&[
            "111", //
            "111", //
        ]);
        tp.set_weight(Point::new(1, 0), i32::MAX);
        tp.set_weight(Point::new(2, 0), i32::MAX);
        let from = Point::new(0, 0);
        let to = Point::new(2, 0);
        let mut pr = PathRange::new(tp.rng);
        let path = pr.astar_path(&tp, from, to, SearchOptions::default()).unwrap();
        assert_eq!(
            path.as_slice(),
            &[
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 0),
            ]
        );
        assert_eq!(pr.cost_at(to), Some(i64::from(i32::MAX) + 3));
    }

    #[test]
    fn matches_reference_on_random_maps() {
        for _ in 0..50 {
            let w = rand::random_range(3..12);
            let h = rand::random_range(3..12);
            let mut tp = TestPather::open(w, h);
            for p in tp.rng {
                if rand::random_range(0..100) < 25 {
                    tp.walls.insert(p);
                } else {
                    tp.set_weight(p, rand::random_range(1..6));
                }
            }
            let from = Point::new(0, 0);
            let to = Point::new(w - 1, h - 1);
            tp.walls.remove(&from);
            tp.walls.remove(&to);

            let expected = tp.dijkstra_cost(from, to);
            let got = search(&tp, from, to, SearchOptions::default());
            match (expected, got) {
                (None, None) => {}
                (Some(cost), Some(path)) => {
                    assert_eq!(tp.path_cost(&path), cost);
                    assert!(path.is_contiguous());
                    assert_eq!(path.first(), from);
                    assert_eq!(path.last(), to);
                }
                (e, g) => panic!("reference {e:?} disagrees with astar {g:?}"),
            }
        }
    }
}
