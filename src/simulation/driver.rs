//! Tick scheduler that owns the whole search state.
//!
//! An external loop calls [`Simulation::advance`] with the time that passed
//! since its last call. Ticks fall due every `interval` seconds starting at
//! t = 0; each due tick advances every live agent exactly once.

use crate::simulation::carver::{self, Maze};
use crate::simulation::config::SimulationConfig;
use crate::simulation::error::ConfigError;
use crate::simulation::population::{Population, PopulationTick, Selection};
use crate::simulation::render::Renderer;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Why the search stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TerminalEvent {
    /// An agent stood on the exit cell at the start of its move.
    GoalReached { agent: usize, tick: u64 },
    /// Every agent spent its move budget; parents were selected.
    Exhausted { selection: Option<Selection> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchStatus {
    Running,
    Finished(TerminalEvent),
}

/// Maze, population, clock and RNG for one search run.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    maze: Maze,
    population: Population,
    rng: StdRng,
    elapsed: f64,
    next_tick: f64,
    ticks: u64,
    status: SearchStatus,
}

impl Simulation {
    /// Generates the maze and spawns the population on the spawn cell.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if the search parameters fail
    /// [`SimulationConfig::validate`].
    pub fn new(
        config: SimulationConfig,
        renderer: &mut dyn Renderer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let maze = carver::generate(config.rows, config.columns, &mut rng, renderer);
        let population = Population::spawn(
            config.population_size,
            config.max_moves,
            maze.spawn(),
            renderer,
        );

        Ok(Self {
            config,
            maze,
            population,
            rng,
            elapsed: 0.0,
            next_tick: 0.0,
            ticks: 0,
            status: SearchStatus::Running,
        })
    }

    /// Moves the clock forward by `dt` seconds and runs every tick that fell due.
    ///
    /// Returns the terminal event on the call that ends the search and
    /// `None` otherwise, including on every call after the end.
    pub fn advance(&mut self, dt: f64, renderer: &mut dyn Renderer) -> Option<TerminalEvent> {
        if self.is_finished() {
            return None;
        }
        self.elapsed += dt.max(0.0);

        while self.elapsed >= self.next_tick {
            if let Some(event) = self.tick(renderer) {
                self.status = SearchStatus::Finished(event);
                return Some(event);
            }
            self.next_tick += self.config.interval;
        }
        None
    }

    /// Advances one interval at a time until the search ends.
    pub fn run_to_completion(&mut self, renderer: &mut dyn Renderer) -> Option<TerminalEvent> {
        if let SearchStatus::Finished(event) = self.status {
            return Some(event);
        }
        loop {
            if let Some(event) = self.advance(self.config.interval, renderer) {
                return Some(event);
            }
            if self.is_finished() {
                return None;
            }
        }
    }

    fn tick(&mut self, renderer: &mut dyn Renderer) -> Option<TerminalEvent> {
        self.ticks += 1;
        match self.population.tick(&self.maze, &mut self.rng, renderer) {
            PopulationTick::Running => None,
            PopulationTick::GoalReached { agent } => {
                info!("Search ended on tick {}: goal reached", self.ticks);
                Some(TerminalEvent::GoalReached {
                    agent,
                    tick: self.ticks,
                })
            }
            PopulationTick::Exhausted => {
                info!(
                    "Search ended on tick {}: all agents used {} moves",
                    self.ticks, self.config.max_moves
                );
                Some(TerminalEvent::Exhausted {
                    selection: self.population.select_parents(),
                })
            }
        }
    }

    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    #[must_use]
    pub const fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.status, SearchStatus::Finished(_))
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds accumulated on the simulation clock.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn best_fitness(&self) -> Option<f32> {
        self.population.best().map(|a| a.fitness)
    }
}
