use std::io;
use std::panic;

use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::RoadmapError;
use crate::event::{self, KeyAction, ViewerEvent};
use crate::render::board::Card;
use crate::render::{self, Board, DocumentLocation};
use crate::ui;

/// State of the terminal board. Built once per `view` run.
pub struct App {
    pub location: DocumentLocation,
    pub board: Option<Board>,
    pub error: Option<String>,
    pub loading: bool,
    pub selected_column: usize,
    pub selected_card: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(location: DocumentLocation) -> Self {
        Self {
            location,
            board: None,
            error: None,
            loading: true,
            selected_column: 0,
            selected_card: 0,
            should_quit: false,
        }
    }

    pub async fn reload(&mut self) {
        self.loading = true;
        let result = render::load_board(&self.location).await;
        self.apply_load(result);
    }

    /// A failed load drops the previous board entirely.
    pub fn apply_load(&mut self, result: Result<Board, RoadmapError>) {
        self.loading = false;
        match result {
            Ok(board) => {
                self.board = Some(board);
                self.error = None;
                self.clamp_selection();
            }
            Err(e) => {
                self.board = None;
                self.error = Some(e.to_string());
                self.selected_column = 0;
                self.selected_card = 0;
            }
        }
    }

    /// Returns `true` when the document should be fetched again.
    pub fn handle_key(&mut self, key: KeyAction) -> bool {
        match key {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Reload => return true,
            KeyAction::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
                self.selected_card = 0;
            }
            KeyAction::Right => {
                if self.selected_column + 1 < self.column_count() {
                    self.selected_column += 1;
                    self.selected_card = 0;
                }
            }
            KeyAction::Up => self.selected_card = self.selected_card.saturating_sub(1),
            KeyAction::Down => {
                if self.selected_card + 1 < self.card_count() {
                    self.selected_card += 1;
                }
            }
        }
        false
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.board
            .as_ref()?
            .columns
            .get(self.selected_column)?
            .cards
            .get(self.selected_card)
    }

    fn column_count(&self) -> usize {
        self.board.as_ref().map_or(0, |b| b.columns.len())
    }

    fn card_count(&self) -> usize {
        self.board
            .as_ref()
            .and_then(|b| b.columns.get(self.selected_column))
            .map_or(0, |c| c.cards.len())
    }

    fn clamp_selection(&mut self) {
        let columns = self.column_count();
        if self.selected_column >= columns {
            self.selected_column = columns.saturating_sub(1);
        }
        let cards = self.card_count();
        if self.selected_card >= cards {
            self.selected_card = cards.saturating_sub(1);
        }
    }
}

/// Runs the board until the user quits, restoring the terminal on the way
/// out (including on panic).
pub async fn run(location: DocumentLocation) -> Result<()> {
    let mut app = App::new(location);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut reader = EventStream::new();
    terminal.draw(|f| ui::render(f, &app))?;
    app.reload().await;

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        match event::next_event(&mut reader).await {
            Some(ViewerEvent::Key(key)) => {
                if app.handle_key(key) {
                    app.loading = true;
                    terminal.draw(|f| ui::render(f, &app))?;
                    app.reload().await;
                }
                if app.should_quit {
                    break;
                }
            }
            Some(ViewerEvent::Resize) => {}
            None => break,
        }
    }

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
