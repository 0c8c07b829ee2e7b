//! Main UI Application
//!
//! Draws the dungeon around the player and turns key presses into moves.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Game, GameState, MoveOutcome};
use crate::render::{detect_render_mode, RenderMode, TileRenderer};
use crate::world::{Position, Rect as CellRect};

/// Height of the status panel under the map
const STATUS_HEIGHT: u16 = 4;

/// Background for room outlines
const ROOM_OUTLINE: Color = Color::Rgb(128, 43, 0);

/// Main UI application
pub struct App {
    /// Current render mode (ASCII, Unicode)
    render_mode: RenderMode,
    /// Tile renderer instance
    tile_renderer: TileRenderer,
    /// Outline room rectangles over the map
    show_rooms: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_mode(detect_render_mode())
    }

    pub fn with_mode(render_mode: RenderMode) -> Self {
        log::info!("Using render mode: {:?}", render_mode);
        Self {
            render_mode,
            tile_renderer: TileRenderer::new(render_mode),
            show_rooms: false,
        }
    }

    /// Handle a key press. Returns true when the game should exit.
    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if game.state() == GameState::Quit {
            return Ok(true);
        }

        let step = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some((0, -1)),
            KeyCode::Down | KeyCode::Char('j') => Some((0, 1)),
            KeyCode::Left | KeyCode::Char('h') => Some((-1, 0)),
            KeyCode::Right | KeyCode::Char('l') => Some((1, 0)),
            KeyCode::Char('f') => {
                game.toggle_fog();
                None
            }
            KeyCode::Char('r') => {
                self.show_rooms = !self.show_rooms;
                None
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                game.quit();
                return Ok(true);
            }
            _ => None,
        };

        if let Some((dx, dy)) = step {
            if game.try_move(dx, dy) == MoveOutcome::Blocked {
                log::trace!("Bumped into something at {:?} + ({}, {})", game.player(), dx, dy);
            }
        }

        Ok(false)
    }

    /// Split the screen into the map and the status panel
    fn split(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(STATUS_HEIGHT)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Inner map area for a screen area, inside the map border
    fn map_inner(area: Rect) -> Rect {
        let (map_area, _) = Self::split(area);
        Block::default().borders(Borders::ALL).inner(map_area)
    }

    /// Dungeon cells shown on a screen of `area` when centered on `player`
    pub fn map_viewport(&self, area: Rect, player: Position) -> CellRect {
        let inner = Self::map_inner(area);
        let width = inner.width as i32;
        let height = inner.height as i32;
        CellRect::new(player.x - width / 2, player.y - height / 2, width, height)
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        let (map_area, status_area) = Self::split(frame.area());
        self.render_map(frame, game, map_area);
        self.render_status(frame, game, status_area);
    }

    fn render_map(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Gloomveil [{}] ", self.render_mode.name()))
            .border_style(Style::default().fg(Color::Rgb(90, 80, 70)));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let view = self.map_viewport(frame.area(), game.player());
        let dungeon = game.dungeon();
        let buf = frame.buffer_mut();

        for screen_y in 0..inner.height {
            for screen_x in 0..inner.width {
                let map_x = view.x + screen_x as i32;
                let map_y = view.y + screen_y as i32;
                self.tile_renderer.render_tile_to_buffer(
                    buf,
                    inner.x + screen_x,
                    inner.y + screen_y,
                    dungeon,
                    map_x,
                    map_y,
                    game.fog_enabled(),
                );
            }
        }

        if self.show_rooms {
            for room in dungeon.grid().rooms() {
                for pos in room.cells() {
                    let on_edge = pos.x == room.x
                        || pos.y == room.y
                        || pos.x == room.right() - 1
                        || pos.y == room.bottom() - 1;
                    let (sx, sy) = (pos.x - view.x, pos.y - view.y);
                    if !on_edge || sx < 0 || sy < 0 || sx >= view.width || sy >= view.height {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut((inner.x + sx as u16, inner.y + sy as u16)) {
                        cell.set_bg(ROOM_OUTLINE);
                    }
                }
            }
        }

        // Player
        let player = game.player();
        let px = player.x - view.x;
        let py = player.y - view.y;
        if px >= 0 && py >= 0 && (px as u16) < inner.width && (py as u16) < inner.height {
            if let Some(cell) = buf.cell_mut((inner.x + px as u16, inner.y + py as u16)) {
                cell.set_char('@');
                cell.set_fg(Color::Rgb(220, 200, 160));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let player = game.player();
        let fog = if game.fog_enabled() { "on" } else { "off" };

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("({}, {})", player.x, player.y),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  Fog: {}", fog), Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(
                "  [hjkl/arrows] move  [f] fog  [r] rooms  [q] quit",
                Style::default().fg(Color::Rgb(90, 90, 90)),
            ),
        ])];

        if let Some(message) = game.messages().last() {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Rgb(180, 160, 120)),
            )));
        }

        let status = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::world::RawLayout;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn test_game() -> Game {
        let layout = RawLayout::from_ascii(
            &["#######", "#.....#", "#.....#", "#.....#", "#######"],
            vec![CellRect::new(1, 1, 5, 3)],
        );
        Game::new(&Config::default(), &layout).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_keys() {
        let mut app = App::with_mode(RenderMode::Ascii);
        let mut game = test_game();
        let start = game.player();

        assert!(!app.handle_input(press(KeyCode::Char('l')), &mut game).unwrap());
        assert_eq!(game.player(), Position::new(start.x + 1, start.y));
        app.handle_input(press(KeyCode::Up), &mut game).unwrap();
        assert_eq!(game.player(), Position::new(start.x + 1, start.y - 1));
    }

    #[test]
    fn test_fog_toggle_and_quit() {
        let mut app = App::with_mode(RenderMode::Ascii);
        let mut game = test_game();

        app.handle_input(press(KeyCode::Char('f')), &mut game).unwrap();
        assert!(!game.fog_enabled());

        assert!(app.handle_input(press(KeyCode::Char('q')), &mut game).unwrap());
        assert_eq!(game.state(), GameState::Quit);
    }

    #[test]
    fn test_viewport_centers_on_player() {
        let app = App::with_mode(RenderMode::Ascii);
        let area = Rect::new(0, 0, 22, 16);
        let view = app.map_viewport(area, Position::new(10, 10));

        // 22x16 screen: map block is 22x12, inner 20x10
        assert_eq!(view, CellRect::new(0, 5, 20, 10));
    }

    #[test]
    fn test_render_draws_player() {
        let app = App::with_mode(RenderMode::Ascii);
        let mut game = test_game();
        game.toggle_fog();

        let mut terminal = Terminal::new(TestBackend::new(22, 16)).unwrap();
        terminal.draw(|frame| app.render(frame, &game)).unwrap();

        let view = app.map_viewport(Rect::new(0, 0, 22, 16), game.player());
        let player = game.player();
        let col = 1 + (player.x - view.x) as u16;
        let row = 1 + (player.y - view.y) as u16;
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(col, row)].symbol(), "@");
        assert!([".", ","].contains(&buffer[(col - 1, row)].symbol()));
    }

    #[test]
    fn test_room_outline_toggle() {
        let mut app = App::with_mode(RenderMode::Ascii);
        let mut game = test_game();
        game.toggle_fog();
        app.handle_input(press(KeyCode::Char('r')), &mut game).unwrap();
        assert!(app.show_rooms);

        let mut terminal = Terminal::new(TestBackend::new(22, 16)).unwrap();
        terminal.draw(|frame| app.render(frame, &game)).unwrap();

        let view = app.map_viewport(Rect::new(0, 0, 22, 16), game.player());
        let screen = |x: i32, y: i32| (1 + (x - view.x) as u16, 1 + (y - view.y) as u16);
        let buffer = terminal.backend().buffer();

        assert_eq!(buffer[screen(1, 1)].bg, ROOM_OUTLINE);
        assert_eq!(buffer[screen(5, 3)].bg, ROOM_OUTLINE);
        assert_ne!(buffer[screen(2, 2)].bg, ROOM_OUTLINE);
        assert_ne!(buffer[screen(0, 0)].bg, ROOM_OUTLINE);

        let title: String = (0..22).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(title.contains("Gloomveil [ASCII]"), "title was {:?}", title);

        app.handle_input(press(KeyCode::Char('r')), &mut game).unwrap();
        assert!(!app.show_rooms);
    }
}
