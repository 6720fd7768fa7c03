#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::io;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use maze_summon::simulation::{NullRenderer, Simulation, SimulationConfig, TerminalEvent};
use maze_summon::ui::{canvas::MazeCanvas, render::{draw_ui, hud_text}};

/// Grow a maze around a sealed centre room and send a population of agents looking for the exit.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML config file; built-in defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible maze and search
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    rows: Option<i32>,
    #[arg(long)]
    columns: Option<i32>,
    #[arg(long)]
    population: Option<usize>,
    #[arg(long)]
    max_moves: Option<u32>,
    /// Run without the terminal UI and print the outcome
    #[arg(long)]
    headless: bool,
}

impl Args {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(max_moves) = self.max_moves {
            config.max_moves = max_moves;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load configuration: {e}");
                process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };
    args.apply(&mut config);

    if args.headless {
        return run_headless(config);
    }

    let mut canvas = MazeCanvas::new(!config.disable_cell_visual);
    let mut sim = match Simulation::new(config, &mut canvas) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            process::exit(1);
        }
    };

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame_rate = Duration::from_millis(50);
    let res = run_app(&mut terminal, &mut sim, &mut canvas, frame_rate);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_headless(config: SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut renderer = NullRenderer::new();
    let mut sim = Simulation::new(config, &mut renderer)?;
    match sim.run_to_completion(&mut renderer) {
        Some(TerminalEvent::GoalReached { agent, tick }) => {
            println!("Agent {agent} reached the exit on tick {tick}");
        }
        Some(TerminalEvent::Exhausted { selection: Some(s) }) => {
            println!(
                "No agent reached the exit after {} ticks; primary #{} ({:.2}), secondary #{} ({:.2})",
                sim.ticks(),
                s.primary,
                s.primary_fitness,
                s.secondary,
                s.secondary_fitness
            );
        }
        Some(TerminalEvent::Exhausted { selection: None }) | None => {
            println!("No agent reached the exit after {} ticks", sim.ticks());
        }
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    sim: &mut Simulation,
    canvas: &mut MazeCanvas,
    frame_rate: Duration,
) -> io::Result<()> {
    let mut last_frame = Instant::now();
    loop {
        // 1. Update
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        sim.advance(dt, canvas);

        // 2. Render
        let lines = canvas.rasterize();
        let hud = hud_text(sim);
        terminal.draw(|f| draw_ui(f, lines, &hud))?;

        // 3. Input
        if event::poll(frame_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
