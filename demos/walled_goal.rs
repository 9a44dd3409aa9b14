use grid_planners::{search_with, Algorithm, PathingGrid, SearchOptions};

// The end is cut off by a full wall:
//  _____
// |S #  |
// |  #  |
// |  # E|
//  _____
// Without the component check every search explores the whole left side before giving up;
// with it the search is skipped.

fn main() {
    env_logger::init();
    let mut pathing_grid = PathingGrid::new(5, 3);
    for y in 0..3 {
        pathing_grid.set_obstacle(2, y, true).unwrap();
    }
    pathing_grid.set_start(0, 0).unwrap();
    pathing_grid.set_end(4, 2).unwrap();
    pathing_grid.update();
    println!("{}", pathing_grid);

    for component_check in [false, true] {
        let options = SearchOptions {
            component_check,
            ..Default::default()
        };
        let result = search_with(&pathing_grid, Algorithm::Bfs, &options).unwrap();
        println!(
            "component check {}: path found {}, {} cells visited",
            component_check,
            result.is_found(),
            result.visited.len()
        );
    }
    // Editing outside the grid is reported instead of panicking
    if let Err(e) = pathing_grid.set_start(7, 0) {
        println!("Error: {e}");
    }
}
