use crate::simulation::driver::{SearchStatus, Simulation, TerminalEvent};
use crate::ui::canvas::{AGENT, CROWD};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One-line status summary for the top of the screen.
#[must_use]
pub fn hud_text(sim: &Simulation) -> String {
    let maze = sim.maze();
    let best = sim
        .best_fitness()
        .map_or_else(|| "-".to_string(), |f| format!("{f:.2}"));
    let status = match sim.status() {
        SearchStatus::Running => "searching".to_string(),
        SearchStatus::Finished(TerminalEvent::GoalReached { agent, tick }) => {
            format!("agent {agent} reached the exit on tick {tick}")
        }
        SearchStatus::Finished(TerminalEvent::Exhausted {
            selection: Some(s),
        }) => format!("out of moves, parents #{} / #{}", s.primary, s.secondary),
        SearchStatus::Finished(TerminalEvent::Exhausted { selection: None }) => {
            "out of moves".to_string()
        }
    };
    format!(
        "Tick: {} | Agents: {} | Best: {} | Exit: ({}, {}) | {} | q: quit",
        sim.ticks(),
        sim.population().len(),
        best,
        maze.exit().x,
        maze.exit().y,
        status
    )
}

fn styled_line(line: String) -> Line<'static> {
    let spans: Vec<Span> = line
        .chars()
        .map(|ch| match ch {
            AGENT | CROWD => Span::styled(ch.to_string(), Style::default().fg(Color::Yellow)),
            _ => Span::raw(ch.to_string()),
        })
        .collect();
    Line::from(spans)
}

pub fn draw_ui(f: &mut Frame, maze_lines: Vec<String>, hud_info: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // Maze
        ])
        .split(f.area());

    let hud = Paragraph::new(Span::styled(
        hud_info,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[0]);

    let text: Vec<Line> = maze_lines.into_iter().map(styled_line).collect();
    let field = Paragraph::new(text)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(field, chunks[1]);
}
