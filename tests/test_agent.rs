use maze_summon::simulation::agent::{fitness_score, Agent, AgentTick, MoveDirection};
use maze_summon::simulation::carver::Maze;
use maze_summon::simulation::grid::{Coord, Grid, WallSide};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A 4x4 grid with every wall standing.
fn walled_maze(spawn: Coord, exit: Coord) -> Maze {
    let mut grid = Grid::new();
    for x in 1..=4 {
        for y in 1..=4 {
            grid.create_cell(Coord::new(x, y));
        }
    }
    Maze::from_grid(grid, 4, 4, spawn, exit)
}

/// A 4x4 grid with no interior walls at all.
fn open_maze(spawn: Coord, exit: Coord) -> Maze {
    let mut grid = Grid::new();
    for x in 1..=4 {
        for y in 1..=4 {
            grid.create_cell(Coord::new(x, y));
        }
    }
    let coords: Vec<Coord> = grid.iter().map(|c| c.position()).collect();
    for coord in coords {
        for side in WallSide::all() {
            let (dx, dy) = side.delta();
            if grid.contains(coord.offset(dx, dy)) {
                grid.remove_wall(coord, side);
            }
        }
    }
    Maze::from_grid(grid, 4, 4, spawn, exit)
}

#[test]
fn test_fitness_literal_arithmetic() {
    // |(3-5) + |3-5|| - 5/5 = |-2 + 2| - 1 = -1
    let score = fitness_score(Coord::new(3, 3), Coord::new(5, 5), 5.0);
    assert!((score - -1.0).abs() < f32::EPSILON);
}

#[test]
fn test_fitness_outer_absolute_value_quirk() {
    let exit = Coord::new(3, 5);
    // dx = 2, dy = -2 -> |2 + 2| = 4
    assert!((fitness_score(Coord::new(5, 3), exit, 0.0) - 4.0).abs() < f32::EPSILON);
    // dx = -2, dy = 2 -> |-2 + 2| = 0 even though the agent is 4 steps away
    let exit = Coord::new(5, 3);
    assert!(fitness_score(Coord::new(3, 5), exit, 0.0).abs() < f32::EPSILON);
}

#[test]
fn test_direction_codes_and_wall_mapping() {
    let codes: Vec<u8> = MoveDirection::all().iter().map(|d| d.code()).collect();
    assert_eq!(codes, vec![0, 1, 2, 3]);
    assert_eq!(MoveDirection::from_code(2), Some(MoveDirection::Left));
    assert_eq!(MoveDirection::from_code(4), None);

    assert_eq!(MoveDirection::Up.wall_side(), WallSide::Up);
    assert_eq!(MoveDirection::Down.wall_side(), WallSide::Down);
    assert_eq!(MoveDirection::Left.wall_side(), WallSide::Left);
    assert_eq!(MoveDirection::Right.wall_side(), WallSide::Right);

    let origin = Coord::new(2, 2);
    assert_eq!(MoveDirection::Up.apply(origin), Coord::new(2, 3));
    assert_eq!(MoveDirection::Down.apply(origin), Coord::new(2, 1));
    assert_eq!(MoveDirection::Left.apply(origin), Coord::new(1, 2));
    assert_eq!(MoveDirection::Right.apply(origin), Coord::new(3, 2));
}

#[test]
fn test_agent_initialization() {
    let agent = Agent::new(Coord::new(2, 3), 10);
    assert_eq!(agent.grid_position, Coord::new(2, 3));
    assert_eq!(agent.moves_taken, 0);
    assert_eq!(agent.penalty, 0.0);
    assert!(agent.history.is_empty());
    assert_eq!(agent.history.capacity(), 10);
    assert!(!agent.is_exhausted());
}

#[test]
fn test_move_budget_is_enforced() {
    let spawn = Coord::new(2, 2);
    let maze = walled_maze(spawn, Coord::new(4, 4));
    let mut rng = StdRng::seed_from_u64(1);
    let mut agent = Agent::new(spawn, 10);

    for _ in 0..10 {
        let tick = agent.update(&maze, &mut rng);
        assert!(matches!(tick, AgentTick::Blocked(_)));
    }

    assert_eq!(agent.moves_taken, 10);
    assert_eq!(agent.history.len(), 10);
    assert!(agent.is_exhausted());
    assert_eq!(agent.grid_position, spawn);
    assert_eq!(agent.penalty, 10.0);
    // |(2-4) + |2-4|| - 10/5 = 0 - 2
    assert!((agent.fitness - -2.0).abs() < f32::EPSILON);

    for _ in 0..5 {
        assert_eq!(agent.update(&maze, &mut rng), AgentTick::Skipped);
    }
    assert_eq!(agent.moves_taken, 10);
    assert_eq!(agent.history.len(), 10);
}

#[test]
fn test_open_cell_moves_agent() {
    let spawn = Coord::new(2, 2);
    let maze = open_maze(spawn, Coord::new(4, 4));
    let mut rng = StdRng::seed_from_u64(9);
    let mut agent = Agent::new(spawn, 5);

    let tick = agent.update(&maze, &mut rng);
    let AgentTick::Moved(direction) = tick else {
        panic!("expected a move, got {tick:?}");
    };
    assert_eq!(agent.grid_position, direction.apply(spawn));
    assert_eq!(agent.penalty, 0.0);
    assert_eq!(agent.history.last(), Some(direction));
}

#[test]
fn test_agent_on_exit_reports_goal() {
    let exit = Coord::new(4, 4);
    let maze = open_maze(exit, exit);
    let mut rng = StdRng::seed_from_u64(2);
    let mut agent = Agent::new(exit, 5);

    assert_eq!(agent.update(&maze, &mut rng), AgentTick::ReachedExit);
    assert_eq!(agent.grid_position, exit);
    assert!(agent.history.is_empty());
}

#[test]
fn test_agent_off_grid_is_lost() {
    let maze = walled_maze(Coord::new(2, 2), Coord::new(4, 4));
    let mut rng = StdRng::seed_from_u64(2);
    let mut agent = Agent::new(Coord::new(9, 9), 5);
    assert_eq!(agent.update(&maze, &mut rng), AgentTick::Lost);
}

#[test]
fn test_restart_replays_recorded_moves() {
    let spawn = Coord::new(2, 2);
    let maze = walled_maze(spawn, Coord::new(4, 4));
    let mut rng = StdRng::seed_from_u64(21);
    let mut agent = Agent::new(spawn, 4);

    for _ in 0..4 {
        agent.update(&maze, &mut rng);
    }
    let recorded: Vec<MoveDirection> = agent.history.iter().collect();

    agent.restart(spawn);
    assert_eq!(agent.moves_taken, 0);
    assert_eq!(agent.penalty, 0.0);

    let replayed: Vec<MoveDirection> = (0..4)
        .map(|_| match agent.update(&maze, &mut rng) {
            AgentTick::Blocked(d) | AgentTick::Moved(d) => d,
            other => panic!("unexpected tick {other:?}"),
        })
        .collect();
    assert_eq!(replayed, recorded);
    let after: Vec<MoveDirection> = agent.history.iter().collect();
    assert_eq!(after, recorded);
}
