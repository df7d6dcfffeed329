/// Fuzzes the pathfinding system with many random grids: a path must be found exactly when the
/// goal shares a connected component with the start, it must be as cheap as an exhaustive
/// Dijkstra search, and it must be the same path every time.
use grid_astar::{AstarSolver, CellGrid, CellSpec, DijkstraSolver, GridSolver, Path};
use grid_util::point::Point;
use itertools::Itertools;
use rand::prelude::*;

fn random_grid(w: usize, h: usize, rng: &mut StdRng, max_cost: u32) -> CellGrid {
    let rows = (0..h)
        .map(|_| {
            (0..w)
                .map(|_| {
                    if rng.gen_bool(0.4) {
                        CellSpec::blocked()
                    } else {
                        CellSpec::open(rng.gen_range(1..=max_cost) as f64)
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    CellGrid::from_rows(rows, 32, 32).unwrap()
}

fn visualize_grid(grid: &CellGrid, start: &Point, end: &Point) {
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if !grid.can_move_to(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Every step of the path moves to an orthogonally adjacent walkable cell.
fn assert_connected(grid: &CellGrid, start: Point, path: &Path) {
    for (a, b) in std::iter::once(start).chain(path.points()).tuple_windows() {
        assert_eq!((a.x - b.x).abs() + (a.y - b.y).abs(), 1, "{a} -> {b}");
        assert!(grid.can_move_to(b));
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = AstarSolver::new();
    let unchecked = AstarSolver {
        component_check: false,
        ..AstarSolver::new()
    };
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, N, &mut rng, 1);
        let reachable = grid.reachable(&start, &end);
        let path = solver.get_path(&grid, start, end).unwrap();
        let searched = unchecked.get_path(&grid, start, end).unwrap();
        // Show the grid if a path is not found
        if path.is_some() != reachable || searched.is_some() != reachable {
            visualize_grid(&grid, &start, &end);
        }
        assert_eq!(path.is_some(), reachable);
        assert_eq!(searched, path);
        if let Some(path) = path {
            assert_connected(&grid, start, &path);
            assert_eq!(path.cells().last().unwrap().point, end);
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 6;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let astar_solver = AstarSolver::new();
    for max_cost in [1, 5] {
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, N, &mut rng, max_cost);
            let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let astar_path = astar_solver.get_path(&grid, start, end).unwrap();
            let dijkstra_path = DijkstraSolver.get_path(&grid, start, end).unwrap();
            match (astar_path, dijkstra_path) {
                (Some(astar_path), Some(dijkstra_path)) => {
                    let delta = (astar_path.cost() - dijkstra_path.cost()).abs();
                    if delta >= 1e-9 {
                        println!(
                            "Astar cost: {}; Dijkstra cost: {}",
                            astar_path.cost(),
                            dijkstra_path.cost()
                        );
                        visualize_grid(&grid, &start, &end);
                    }
                    assert!(delta < 1e-9);
                    assert_connected(&grid, start, &astar_path);
                    let walk = std::iter::once(start)
                        .chain(astar_path.points())
                        .collect::<Vec<_>>();
                    assert_eq!(astar_solver.get_path_cost(&grid, &walk), astar_path.cost());
                }
                (None, None) => {}
                (a, d) => panic!("A* found {:?}, Dijkstra found {:?}", a.is_some(), d.is_some()),
            }
        }
    }
}

fn random_fractional_grid(w: usize, h: usize, rng: &mut StdRng) -> CellGrid {
    let rows = (0..h)
        .map(|_| {
            (0..w)
                .map(|_| {
                    if rng.gen_bool(0.3) {
                        CellSpec::blocked()
                    } else {
                        CellSpec::open(rng.gen_range(1..=9) as f64 * 0.5)
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    CellGrid::from_rows(rows, 32, 32).unwrap()
}

/// Least cost of entering every cell from `start`, found by Bellman-Ford relaxation over the
/// raw cell table. Unreachable cells stay at infinity.
fn bellman_ford(grid: &CellGrid, start: Point) -> Vec<Vec<f64>> {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut dist = vec![vec![f64::INFINITY; w as usize]; h as usize];
    if !grid.can_move_to(start) {
        return dist;
    }
    dist[start.y as usize][start.x as usize] = 0.0;
    let mut changed = true;
    while changed {
        changed = false;
        for (x, y) in (0..w).cartesian_product(0..h) {
            let here = dist[y as usize][x as usize];
            if here.is_infinite() {
                continue;
            }
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let Some(next) = grid.get(x + dx, y + dy) else {
                    continue;
                };
                if !next.walkable {
                    continue;
                }
                let (nx, ny) = (next.point.x as usize, next.point.y as usize);
                if here + next.cost < dist[ny][nx] {
                    dist[ny][nx] = here + next.cost;
                    changed = true;
                }
            }
        }
    }
    dist
}

#[test]
fn fuzz_fractional_costs_against_bellman_ford() {
    const N: usize = 7;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(3);
    let solver = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let grid = random_fractional_grid(N, N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let dist = bellman_ford(&grid, start);
        for (x, y) in (0..N as i32).cartesian_product(0..N as i32) {
            let end = Point::new(x, y);
            let expected = dist[y as usize][x as usize];
            let path = solver.get_path(&grid, start, end).unwrap();
            match path {
                Some(path) => {
                    if (path.cost() - expected).abs() >= 1e-9 {
                        println!("A* cost: {}; Bellman-Ford cost: {}", path.cost(), expected);
                        visualize_grid(&grid, &start, &end);
                    }
                    assert!((path.cost() - expected).abs() < 1e-9);
                    assert_connected(&grid, start, &path);
                }
                None => assert!(expected.is_infinite(), "missed {start} -> {end}"),
            }
        }
    }
}

#[test]
fn repeated_searches_agree() {
    let mut rng = StdRng::seed_from_u64(2);
    let solver = AstarSolver::new();
    for _ in 0..200 {
        let grid = random_grid(12, 12, &mut rng, 3);
        let start = Point::new(rng.gen_range(0..12), rng.gen_range(0..12));
        let end = Point::new(rng.gen_range(0..12), rng.gen_range(0..12));
        let first = solver.get_path(&grid, start, end).unwrap();
        for _ in 0..3 {
            assert_eq!(solver.get_path(&grid, start, end).unwrap(), first);
        }
    }
}

#[test]
fn edge_endpoints_stay_in_bounds() {
    let grid = CellGrid::from_ascii("....\n....\n....", 32, 32).unwrap();
    let solver = AstarSolver::new();
    let corners = [
        Point::new(0, 0),
        Point::new(3, 0),
        Point::new(0, 2),
        Point::new(3, 2),
    ];
    for (&a, &b) in corners.iter().cartesian_product(corners.iter()) {
        let path = solver.get_path(&grid, a, b).unwrap().unwrap();
        assert_eq!(path.len() as i32, (a.x - b.x).abs() + (a.y - b.y).abs());
        if a != b {
            assert_ne!(path.cells()[0].point, a);
        }
        assert_connected(&grid, a, &path);
    }
}
