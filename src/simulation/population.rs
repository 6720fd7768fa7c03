use crate::simulation::agent::{Agent, AgentTick};
use crate::simulation::carver::Maze;
use crate::simulation::grid::Coord;
use crate::simulation::render::Renderer;
use log::{debug, info};
use rand::Rng;

/// The two agents picked at the end of a generation.
///
/// `primary` is the fittest agent. `secondary` is whichever agent held the
/// running maximum just before `primary` overtook it during a single
/// front-to-back scan, which is not necessarily the second-best overall.
/// When the first agent scanned is the fittest, both point at it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub primary: usize,
    pub primary_fitness: f32,
    pub secondary: usize,
    pub secondary_fitness: f32,
}

/// Result of advancing every agent once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationTick {
    Running,
    /// The agent at this index was found on the exit cell.
    GoalReached { agent: usize },
    /// Every agent has spent its move budget.
    Exhausted,
}

/// A batch of agents searching the same maze.
#[derive(Debug, Clone)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Creates `size` agents on `spawn`, each with its own visual.
    pub fn spawn(size: usize, max_moves: u32, spawn: Coord, renderer: &mut dyn Renderer) -> Self {
        let agents = (0..size)
            .map(|_| {
                let mut agent = Agent::new(spawn, max_moves);
                agent.visual = Some(renderer.instantiate_agent_visual(spawn));
                agent
            })
            .collect();
        info!(
            "Spawned {size} agents at ({}, {}) with {max_moves} moves each",
            spawn.x, spawn.y
        );
        Self { agents }
    }

    #[must_use]
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn all_exhausted(&self) -> bool {
        self.agents.iter().all(Agent::is_exhausted)
    }

    /// Advances every live agent by one move.
    ///
    /// Stops at the first agent found standing on the exit; agents after it
    /// are not advanced this tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        rng: &mut R,
        renderer: &mut dyn Renderer,
    ) -> PopulationTick {
        let mut moved = 0usize;
        let mut blocked = 0usize;

        for (index, agent) in self.agents.iter_mut().enumerate() {
            match agent.update(maze, rng) {
                AgentTick::ReachedExit => {
                    info!(
                        "Agent {index} found the exit at ({}, {})",
                        agent.grid_position.x, agent.grid_position.y
                    );
                    return PopulationTick::GoalReached { agent: index };
                }
                AgentTick::Moved(_) => {
                    moved += 1;
                    if let Some(handle) = agent.visual {
                        renderer.set_position(handle, agent.grid_position);
                    }
                }
                AgentTick::Blocked(_) => blocked += 1,
                AgentTick::Skipped | AgentTick::Lost => {}
            }
        }
        debug!("Tick: {moved} moved, {blocked} blocked");

        if self.all_exhausted() {
            PopulationTick::Exhausted
        } else {
            PopulationTick::Running
        }
    }

    /// Picks the parents for the next generation.
    ///
    /// Only selection happens here: move histories are neither recombined
    /// nor mutated, so the next generation would be identical.
    #[must_use]
    pub fn select_parents(&self) -> Option<Selection> {
        let mut highest = f32::NEG_INFINITY;
        let mut previous: Option<usize> = None;
        let mut selection: Option<Selection> = None;

        for (index, agent) in self.agents.iter().enumerate() {
            if agent.fitness > highest {
                let secondary = previous.unwrap_or(index);
                selection = Some(Selection {
                    primary: index,
                    primary_fitness: agent.fitness,
                    secondary,
                    secondary_fitness: self.agents[secondary].fitness,
                });
                previous = Some(index);
                highest = agent.fitness;
            }
        }

        if let Some(s) = &selection {
            info!(
                "Selected parents: primary #{} ({:.2}), secondary #{} ({:.2})",
                s.primary, s.primary_fitness, s.secondary, s.secondary_fitness
            );
        }
        selection
    }

    /// Highest-fitness agent; ties go to the earliest.
    #[must_use]
    pub fn best(&self) -> Option<&Agent> {
        self.agents
            .iter()
            .reduce(|best, a| if a.fitness > best.fitness { a } else { best })
    }

    /// Sends every agent back to `spawn` to replay its recorded moves.
    pub fn restart(&mut self, spawn: Coord, renderer: &mut dyn Renderer) {
        for agent in &mut self.agents {
            agent.restart(spawn);
            if let Some(handle) = agent.visual {
                renderer.set_position(handle, spawn);
            }
        }
    }
}
