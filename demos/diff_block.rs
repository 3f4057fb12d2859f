//! Diff Demo: A file edit shown as a collapsible diff.
//!
//! Starts collapsed with the change summary. Enter, Space, or Ctrl+O
//! expands the windowed diff; 'n' toggles line numbers by rebuilding the
//! block with a different configuration.
//!
//! Press 'q' or Escape to quit.

use crossterm::{
    cursor, event, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use foldout::{BlockConfig, DiffBlock, Disclosure, InputEvent, Key, KeyCode, Status, Widget};
use std::io::{self, Write};

const OLD: &str = r#"fn main() {
    let config = Config::load("app.toml");
    let server = Server::new(config);

    server.listen(8080);
    server.run();
}

fn shutdown(server: &Server) {
    server.stop();
}
"#;

const NEW: &str = r#"fn main() -> Result<()> {
    let config = Config::load("app.toml")?;
    let server = Server::new(config);

    server.listen(config.port)?;
    server.run()
}

fn shutdown(server: &Server) {
    server.stop();
}
"#;

/// Raw mode and alternate screen, restored on drop.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn build(show_line_numbers: bool, expanded: bool, width: u16, height: u16) -> DiffBlock {
    let config = BlockConfig {
        context_radius: Some(1),
        show_line_numbers,
        start_expanded: expanded,
        initial_status: Status::Complete,
        ..BlockConfig::default()
    };
    let mut block = DiffBlock::new("edit", &config).with_source("src/main.rs");
    block.resize(width, height);
    block.set_diff(OLD, NEW);
    block.focus();
    block
}

fn main() -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let _screen = Screen::enter()?;

    let mut numbered = false;
    let mut block = build(numbered, false, width, height);

    loop {
        if block.needs_redraw() {
            let mut stdout = io::stdout();
            queue!(stdout, Clear(ClearType::All))?;
            for (row, line) in (0..height).zip(block.render().lines()) {
                queue!(stdout, cursor::MoveTo(0, row), Print(line))?;
            }
            stdout.flush()?;
            block.clear_redraw();
        }

        let Some(input) = InputEvent::from_crossterm(event::read()?) else {
            continue;
        };
        match input {
            InputEvent::Key(key) if key.code == KeyCode::Esc || key == Key::plain(KeyCode::Char('q')) => {
                return Ok(());
            }
            InputEvent::Key(key) if key == Key::plain(KeyCode::Char('n')) => {
                numbered = !numbered;
                let (width, height) = terminal::size()?;
                block = build(numbered, block.is_expanded(), width, height);
            }
            other => {
                block.handle_input(&other);
            }
        }
    }
}
