pub mod agent;
pub mod carver;
pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod history;
pub mod params;
pub mod population;
pub mod render;

pub use carver::Maze;
pub use config::SimulationConfig;
pub use driver::{Simulation, TerminalEvent};
pub use render::{NullRenderer, Renderer, VisualHandle};
