//! Streaming Demo: A command's output streamed into a collapsible block.
//!
//! A producer thread streams chunks of fake build output through an event
//! queue while a ticker thread animates the spinner. The block is focused:
//! Enter, Space, or Ctrl+O toggles it.
//!
//! Press 'q' or Escape to quit.

use crossterm::{
    cursor, event, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use foldout::{
    BlockConfig, Disclosure, EventQueue, InputEvent, Key, KeyCode, OutputBlock, Status, StatusBar, Widget,
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

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

fn draw(block: &OutputBlock, bar: &StatusBar, height: u16) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(stdout, Clear(ClearType::All))?;
    for (row, line) in (0..height.saturating_sub(1)).zip(block.render().lines()) {
        queue!(stdout, cursor::MoveTo(0, row), Print(line))?;
    }
    queue!(stdout, cursor::MoveTo(0, height.saturating_sub(1)), Print(bar.render()))?;
    stdout.flush()
}

fn is_quit(event: &InputEvent) -> bool {
    matches!(
        event,
        InputEvent::Key(key) if key.code == KeyCode::Esc
            || *key == Key::plain(KeyCode::Char('q'))
            || *key == Key::ctrl(KeyCode::Char('c'))
    )
}

fn main() -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let _screen = Screen::enter()?;

    let config = BlockConfig {
        max_visible_lines: 8,
        show_line_numbers: true,
        ..BlockConfig::default()
    };
    let mut block = OutputBlock::new("cargo build", &config).with_source("--release");
    block.resize(width, height.saturating_sub(1));
    block.focus();

    let mut bar = StatusBar::new();
    bar.resize(width, 1);
    bar.set_all("foldout", "enter/space/ctrl+o toggle", "q quit");

    let queue = EventQueue::new();
    let running = Arc::new(AtomicBool::new(true));

    let producer = {
        let tx = queue.sender();
        thread::spawn(move || {
            tx.set_status(Status::Running);
            for i in 1..=120 {
                tx.append_chunk(format!("   Compiling crate-{i:03} "));
                thread::sleep(Duration::from_millis(15));
                tx.append_chunk(format!("v0.{i}.0\n"));
                thread::sleep(Duration::from_millis(25));
            }
            tx.append_line("    Finished `release` profile [optimized] target(s)");
            tx.set_status(Status::Complete);
        })
    };

    let ticker = {
        let tx = queue.sender();
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) && tx.tick() {
                thread::sleep(Duration::from_millis(80));
            }
        })
    };

    loop {
        while event::poll(Duration::from_millis(10))? {
            let Some(input) = InputEvent::from_crossterm(event::read()?) else {
                continue;
            };
            if is_quit(&input) {
                running.store(false, Ordering::Relaxed);
                let _ = ticker.join();
                return Ok(());
            }
            if let InputEvent::Resize { width, height } = input {
                bar.resize(width, 1);
                block.resize(width, height.saturating_sub(1));
            } else {
                block.handle_input(&input);
            }
        }

        queue.drain_into(&mut block);

        if block.needs_redraw() || bar.needs_redraw() {
            let (_, height) = terminal::size()?;
            draw(&block, &bar, height)?;
            block.clear_redraw();
            bar.clear_redraw();
        }

        if producer.is_finished() && block.status() == Status::Complete && bar.center() != "done" {
            bar.set_center("done");
        }
    }
}
