//! Pathfinding on a random terrain map, printed to the terminal.
//!
//! Run: cargo run --bin pathfeeder-demo
//!
//! Terrain 1 is grass, 2 is sand, 3 is swamp; `#` is rock the hero cannot
//! enter. The path is drawn with `*`.

use std::collections::HashSet;

use pathfeeder::{
    CostSpec, Host, Mover, Pathfeeder, PathfeederConfig, Point, Range, TerrainCost, TerrainGrid,
    TerrainMap, VariableStore,
};

const WIDTH: i32 = 40;
const HEIGHT: i32 = 16;
/// Variable slot the swamp cost is read from.
const SWAMP_SLOT: i32 = 1;

struct World {
    grid: TerrainGrid,
    rocks: HashSet<Point>,
    vars: Vec<i32>,
    hero: Point,
}

impl World {
    fn random() -> Self {
        let mut grid = TerrainGrid::new(WIDTH, HEIGHT, 1);
        let mut rocks = HashSet::new();
        for p in Range::sized(WIDTH, HEIGHT) {
            match rand::random_range(0..100) {
                0..18 => {
                    rocks.insert(p);
                }
                18..35 => {
                    grid.set(p, 2);
                }
                35..50 => {
                    grid.set(p, 3);
                }
                _ => {}
            }
        }
        let hero = Point::new(0, HEIGHT / 2);
        rocks.remove(&hero);
        Self {
            grid,
            rocks,
            vars: vec![0, 6],
            hero,
        }
    }

    fn render(&self, path: &[Point]) -> String {
        let on_path: HashSet<Point> = path.iter().copied().collect();
        let mut out = String::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let p = Point::new(x, y);
                let ch = if p == self.hero {
                    '@'
                } else if on_path.contains(&p) {
                    '*'
                } else if self.rocks.contains(&p) {
                    '#'
                } else {
                    match self.grid.terrain_at(p) {
                        2 => ':',
                        3 => '~',
                        _ => '.',
                    }
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl TerrainMap for World {
    fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    fn terrain_at(&self, p: Point) -> i32 {
        self.grid.terrain_at(p)
    }
}

impl VariableStore for World {
    fn variable(&self, slot: i32) -> Option<i32> {
        self.vars.variable(slot)
    }
}

impl Host for World {
    fn locate(&self, mover: Mover) -> Option<Point> {
        (mover == Mover::Hero).then_some(self.hero)
    }

    fn can_move(&self, _mover: Mover, _from: Point, to: Point) -> bool {
        !self.rocks.contains(&to)
    }
}

fn main() {
    let config = PathfeederConfig {
        terrain_costs: vec![
            TerrainCost {
                terrain: 2,
                cost: CostSpec::Literal(3),
            },
            TerrainCost {
                terrain: 3,
                cost: CostSpec::Variable(SWAMP_SLOT),
            },
        ],
        ..PathfeederConfig::default()
    };
    let mut pf = Pathfeeder::new(config);
    let mut world = World::random();
    let dest = Point::new(WIDTH - 1, HEIGHT / 2);

    for swamp_cost in [1, 6, 20] {
        world.vars[SWAMP_SLOT as usize] = swamp_cost;
        match pf.find_path(&world, Mover::Hero, dest) {
            Ok(Some(id)) => {
                let Some(path) = pf.path(id) else {
                    continue;
                };
                println!(
                    "swamp cost {swamp_cost}: path {id}, {} vertices, {} cells expanded",
                    path.len(),
                    pf.last_search_stats().expanded
                );
                println!("{}", world.render(path.as_slice()));
            }
            Ok(None) => {
                println!("swamp cost {swamp_cost}: {dest} is unreachable");
                println!("{}", world.render(&[]));
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    pf.on_map_change();
    println!("{} paths kept after leaving the map", pf.paths().len());
}
