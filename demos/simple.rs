use grid_astar::{AstarSolver, CellGrid, GridSolver, PathFollower, Step};
use grid_util::point::Point;
use std::num::NonZeroU32;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S# |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// and then walked by an agent moving 8 pixels per tick over 32 pixel tiles.

fn main() {
    let grid = CellGrid::from_ascii(".#.\n.#.\n...", 32, 32).unwrap();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let mut path = AstarSolver::new()
        .get_path(&grid, start, end)
        .unwrap()
        .unwrap();
    println!("Path (cost {}):", path.cost());
    for p in path.points() {
        println!("{:?}", p);
    }

    let follower = PathFollower::new(&grid, NonZeroU32::new(8).unwrap());
    let mut position = (0, 0);
    let mut ticks = 0;
    loop {
        match follower.step(&mut path, position) {
            Step::Arrived => break,
            Step::Reached(p) => println!("tick {ticks}: reached {p}"),
            Step::Move { dx, dy } => position = (position.0 + dx, position.1 + dy),
        }
        ticks += 1;
    }
    println!("Arrived at {:?} after {ticks} ticks", position);
}
