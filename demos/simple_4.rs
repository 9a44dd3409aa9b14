use grid_planners::{search, Algorithm, PathingGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    env_logger::init();
    let mut pathing_grid = PathingGrid::new(3, 3);
    pathing_grid.set_obstacle(1, 1, true).unwrap();
    pathing_grid.set_start(0, 0).unwrap();
    pathing_grid.set_end(2, 2).unwrap();
    pathing_grid.update();
    println!("{}", pathing_grid);
    let result = search(&pathing_grid, Algorithm::AStar).unwrap();
    println!("Path:");
    for p in result.path {
        println!("{:?}", p);
    }
}
