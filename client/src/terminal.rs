use std::collections::HashMap;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use common::games::snake::{
    DeathReason, GameSnapshot, GameStatus, InputAction, Point, SegmentColor, SessionCommand,
};
use common::log;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, PrintStyledContent, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::sync::mpsc;

use crate::state::{AppState, SharedState};

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const CELL_WIDTH: u16 = 2;
const SIDEBAR_GAP: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    Session(SessionCommand),
    Quit,
}

/// Name used by the shared key table (`ArrowUp`, `w`, `" "`).
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

/// Enter starts from the idle and game-over screens; everything else goes
/// through the game key table.
pub fn map_key(code: KeyCode, status: GameStatus) -> Option<UiAction> {
    let can_start = matches!(status, GameStatus::Idle | GameStatus::GameOver);
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(UiAction::Quit),
        KeyCode::Enter if can_start => return Some(UiAction::Session(SessionCommand::Start)),
        KeyCode::Char('r') | KeyCode::Char('R') if status == GameStatus::GameOver => {
            return Some(UiAction::Session(SessionCommand::Start));
        }
        _ => {}
    }

    let command = match InputAction::from_key(&key_name(code)?)? {
        InputAction::Turn(direction) => SessionCommand::Turn(direction),
        InputAction::TogglePause => SessionCommand::TogglePause,
    };
    Some(UiAction::Session(command))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Empty,
    Head(SegmentColor),
    Body(SegmentColor),
    Food,
}

/// Segment index by cell, head first.
fn segment_lookup(snapshot: &GameSnapshot) -> HashMap<Point, usize> {
    let mut lookup = HashMap::with_capacity(snapshot.snake.len());
    for (index, point) in snapshot.snake.iter().enumerate().rev() {
        lookup.insert(*point, index);
    }
    lookup
}

fn cell_kind(snapshot: &GameSnapshot, lookup: &HashMap<Point, usize>, point: Point) -> CellKind {
    if let Some(&index) = lookup.get(&point) {
        let color = snapshot
            .colors
            .get(index)
            .copied()
            .unwrap_or_else(|| SegmentColor::for_segment(index));
        return if index == 0 {
            CellKind::Head(color)
        } else {
            CellKind::Body(color)
        };
    }
    if point == snapshot.food {
        return CellKind::Food;
    }
    CellKind::Empty
}

fn terminal_color(color: SegmentColor) -> Color {
    match color {
        SegmentColor::Red => Color::Rgb { r: 239, g: 68, b: 68 },
        SegmentColor::Orange => Color::Rgb { r: 249, g: 115, b: 22 },
        SegmentColor::Yellow => Color::Rgb { r: 234, g: 179, b: 8 },
        SegmentColor::Green => Color::Rgb { r: 34, g: 197, b: 94 },
        SegmentColor::Sky => Color::Rgb { r: 14, g: 165, b: 233 },
        SegmentColor::Blue => Color::Rgb { r: 59, g: 130, b: 246 },
        SegmentColor::Indigo => Color::Rgb { r: 99, g: 102, b: 241 },
        SegmentColor::Violet => Color::Rgb { r: 139, g: 92, b: 246 },
        SegmentColor::Pink => Color::Rgb { r: 236, g: 72, b: 153 },
    }
}

fn death_text(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::WallCollision => "hit the wall",
        DeathReason::SelfCollision => "ran into itself",
    }
}

fn sidebar_lines(state: &AppState) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(snapshot) = &state.snapshot else {
        lines.push("Loading...".to_string());
        return lines;
    };

    lines.push(format!("Score:      {}", snapshot.score));
    lines.push(format!("High score: {}", snapshot.high_score));
    lines.push(format!("Speed:      {} ms", snapshot.speed.as_millis()));
    lines.push(String::new());

    match snapshot.status {
        GameStatus::Idle => lines.push("Press Enter to start".to_string()),
        GameStatus::Playing => lines.push("Space to pause".to_string()),
        GameStatus::Paused => lines.push("Paused, Space to resume".to_string()),
        GameStatus::GameOver => {
            lines.push("GAME OVER".to_string());
            if let Some(summary) = &state.last_game_over {
                lines.push(format!("Snake {}", death_text(summary.reason)));
                lines.push(format!("Final score: {}", summary.score));
                if let Some(seconds) = summary.duration_seconds {
                    lines.push(format!("Time: {}s", seconds));
                }
            }
            lines.push("Enter or R to play again".to_string());
        }
    }
    lines.push(String::new());

    if state.offline {
        lines.push("Offline, scores stay local".to_string());
        return lines;
    }

    match &state.user {
        Some(user) => lines.push(format!("Player: {}", user.display_name())),
        None => lines.push("Not signed in, scores are not submitted".to_string()),
    }
    lines.push(String::new());
    lines.push("Leaderboard".to_string());
    if state.leaderboard.is_empty() {
        lines.push("  no scores yet".to_string());
    }
    let own_id = state.user.as_ref().map(|user| &user.id);
    for (rank, entry) in state.leaderboard.iter().enumerate() {
        let marker = if own_id == Some(&entry.user_id) { ">" } else { " " };
        lines.push(format!(
            "{}{:>2}. {:<16} {:>4}",
            marker,
            rank + 1,
            entry.display_name(),
            entry.best_score
        ));
    }
    lines
}

const CONTROLS: &str = "Arrows/WASD move, Space pause, Q quit";

/// Raw-mode terminal front end. Reads keys, forwards them to the session and
/// redraws whenever the shared state changes.
pub struct TerminalUi {
    shared_state: SharedState,
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl TerminalUi {
    pub fn new(shared_state: SharedState, commands: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self {
            shared_state,
            commands,
        }
    }

    pub fn run(&self) -> std::io::Result<()> {
        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;

        let result = self.event_loop(&mut stdout);

        execute!(stdout, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        result
    }

    fn event_loop(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let mut drawn_version = None;

        while !self.shared_state.should_close() {
            let state = self.shared_state.get_state();
            if drawn_version != Some(state.version) {
                draw(stdout, &state)?;
                drawn_version = Some(state.version);
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let status = state
                        .snapshot
                        .as_ref()
                        .map(|s| s.status)
                        .unwrap_or_default();
                    match map_key(key.code, status) {
                        Some(UiAction::Quit) => {
                            self.send(SessionCommand::Stop);
                            break;
                        }
                        Some(UiAction::Session(command)) => self.send(command),
                        None => {}
                    }
                }
                Event::Resize(_, _) => drawn_version = None,
                _ => {}
            }
        }
        Ok(())
    }

    fn send(&self, command: SessionCommand) {
        if self.commands.send(command).is_err() {
            log!("Session is gone, dropping {:?}", command);
            self.shared_state.set_should_close();
        }
    }
}

fn draw(out: &mut Stdout, state: &AppState) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    let Some(snapshot) = &state.snapshot else {
        queue!(out, MoveTo(0, 0), Print("Loading..."))?;
        return out.flush();
    };

    let board = snapshot.board_size.max(0) as u16;
    let inner_width = board * CELL_WIDTH;
    let border = "#".repeat(inner_width as usize + 2);

    queue!(out, MoveTo(0, 0), Print(&border))?;
    let lookup = segment_lookup(snapshot);
    for y in 0..board {
        queue!(out, MoveTo(0, y + 1), Print("#"))?;
        for x in 0..board {
            let point = Point::new(x as i32, y as i32);
            match cell_kind(snapshot, &lookup, point) {
                CellKind::Empty => queue!(out, Print("  "))?,
                CellKind::Food => queue!(out, PrintStyledContent("()".with(Color::Red)))?,
                CellKind::Head(color) => {
                    queue!(out, PrintStyledContent("[]".on(terminal_color(color)).with(Color::White)))?
                }
                CellKind::Body(color) => {
                    queue!(out, PrintStyledContent("  ".on(terminal_color(color))))?
                }
            }
        }
        queue!(out, Print("#"))?;
    }
    queue!(out, MoveTo(0, board + 1), Print(&border))?;
    queue!(out, MoveTo(0, board + 2), Print(CONTROLS))?;

    let sidebar_x = inner_width + 2 + SIDEBAR_GAP;
    for (row, line) in sidebar_lines(state).iter().enumerate() {
        queue!(out, MoveTo(sidebar_x, row as u16 + 1), Print(line))?;
    }

    out.flush()
}
