//! Dispatch: Serial delivery of events to a widget.
//!
//! Widgets are single-threaded; producers that run elsewhere (a child
//! process reader, a ticker thread, the input thread) send [`BlockEvent`]s
//! through cloneable [`EventSender`]s and the UI thread applies them in send
//! order with [`EventQueue::drain_into`].
//!
//! ```
//! use foldout::dispatch::EventQueue;
//! use foldout::{BlockConfig, Disclosure, OutputBlock, Status};
//!
//! let queue = EventQueue::new();
//! let tx = queue.sender();
//! std::thread::spawn(move || {
//!     tx.set_status(Status::Running);
//!     tx.append_line("compiling");
//!     tx.set_status(Status::Complete);
//! })
//! .join()
//! .unwrap();
//!
//! let mut block = OutputBlock::new("build", &BlockConfig::default());
//! assert_eq!(queue.drain_into(&mut block), 3);
//! assert_eq!(block.status(), Status::Complete);
//! ```

use crate::input::InputEvent;
use crate::widget::{Disclosure, Status, Widget};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::trace;

/// An event for a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    /// Host input (key, resize, focus change).
    Input(InputEvent),
    /// A complete line of output.
    AppendLine(String),
    /// A streamed chunk that may end mid-line.
    AppendChunk(String),
    /// Status change.
    SetStatus(Status),
    /// Spinner tick.
    Tick,
    /// Remove all content.
    Clear,
}

/// Producer handle for an [`EventQueue`].
///
/// Sends never block. Events sent after the queue is dropped are discarded.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<BlockEvent>,
}

impl EventSender {
    /// Send an event. Returns `false` if the queue is gone.
    pub fn send(&self, event: BlockEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Send a host input event.
    pub fn input(&self, event: InputEvent) -> bool {
        self.send(BlockEvent::Input(event))
    }

    /// Send a complete line of output.
    pub fn append_line(&self, line: impl Into<String>) -> bool {
        self.send(BlockEvent::AppendLine(line.into()))
    }

    /// Send a streamed chunk.
    pub fn append_chunk(&self, chunk: impl Into<String>) -> bool {
        self.send(BlockEvent::AppendChunk(chunk.into()))
    }

    /// Send a status change.
    pub fn set_status(&self, status: Status) -> bool {
        self.send(BlockEvent::SetStatus(status))
    }

    /// Send a spinner tick.
    pub fn tick(&self) -> bool {
        self.send(BlockEvent::Tick)
    }

    /// Send a clear request.
    pub fn clear(&self) -> bool {
        self.send(BlockEvent::Clear)
    }
}

/// Unbounded event queue consumed on the UI thread.
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<BlockEvent>,
    rx: Receiver<BlockEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Create a producer handle.
    pub fn sender(&self) -> EventSender {
        EventSender { tx: self.tx.clone() }
    }

    /// Get the receiver for `select!`-style loops.
    pub const fn receiver(&self) -> &Receiver<BlockEvent> {
        &self.rx
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True when no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Apply every pending event to `widget` in send order.
    ///
    /// Returns the number of events applied.
    pub fn drain_into<W: Widget + Disclosure>(&self, widget: &mut W) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            apply(widget, event);
            applied += 1;
        }
        applied
    }

    /// Wait up to `timeout` for an event, then apply it and everything
    /// queued behind it.
    ///
    /// Returns the number of events applied (0 on timeout).
    pub fn wait_into<W: Widget + Disclosure>(&self, widget: &mut W, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                apply(widget, event);
                1 + self.drain_into(widget)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => 0,
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one event to `widget`.
///
/// Returns `true` if the widget consumed it (input events only; content and
/// status events always apply).
pub fn apply<W: Widget + Disclosure>(widget: &mut W, event: BlockEvent) -> bool {
    trace!(?event, "applying block event");
    match event {
        BlockEvent::Input(input) => return widget.handle_input(&input),
        BlockEvent::AppendLine(line) => widget.append_line(&line),
        BlockEvent::AppendChunk(chunk) => widget.append_chunk(&chunk),
        BlockEvent::SetStatus(status) => widget.set_status(status),
        BlockEvent::Tick => widget.tick(),
        BlockEvent::Clear => widget.clear(),
    }
    true
}
