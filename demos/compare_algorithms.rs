use grid_planners::{
    path_cost, search_with, waypoint_cost, Algorithm, PathingGrid, RrtConfig, SearchOptions,
};

// Runs every algorithm on the same 12x8 grid with two offset walls and prints what each one
// found. Run with RUST_LOG=info to see the search log.

fn main() {
    env_logger::init();
    let mut pathing_grid = PathingGrid::new(12, 8);
    for y in 0..6 {
        pathing_grid.set_obstacle(4, y, true).unwrap();
    }
    for y in 2..8 {
        pathing_grid.set_obstacle(8, y, true).unwrap();
    }
    pathing_grid.set_start(0, 0).unwrap();
    pathing_grid.set_end(11, 7).unwrap();
    pathing_grid.update();
    println!("{}", pathing_grid);

    let options = SearchOptions {
        rrt: RrtConfig::with_seed(42),
        component_check: true,
        ..Default::default()
    };
    for algorithm in Algorithm::ALL {
        let result = search_with(&pathing_grid, algorithm, &options).unwrap();
        if algorithm.is_sampling() {
            println!(
                "{:>9}: {} cells, length {:.2}, {} cells visited, {} iterations",
                algorithm,
                result.len(),
                waypoint_cost(&result.waypoints),
                result.visited.len(),
                result.expanded
            );
        } else {
            println!(
                "{:>9}: {} cells, length {}, {} cells visited, {} expanded",
                algorithm,
                result.len(),
                path_cost(&result.path),
                result.visited.len(),
                result.expanded
            );
        }
    }
}
