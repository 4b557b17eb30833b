use std::future::Future;
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;

use crossterm::cursor::{MoveDown, MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use tokio::sync::mpsc;

use crate::domain::primitive::{CursorPos, Frame, TerminalSize};
use crate::interface_adapter::port::TerminalPort;
use crate::shared::error::PromptError;

/// Raw mode is a property of the process's controlling terminal, so only one
/// prompt may own it at a time.
static RAW_MODE_OWNER: AtomicBool = AtomicBool::new(false);

const READ_BUFFER_SIZE: usize = 1024;

type InputChunks = mpsc::UnboundedReceiver<io::Result<Vec<u8>>>;

/// Receiving end of the stdin reader thread. The thread is started once and
/// outlives any single prompt; the raw-mode owner borrows the receiver and
/// hands it back on release, so bytes read after a prompt ends are kept for
/// the next one.
static STDIN_CHUNKS: OnceLock<Mutex<Option<InputChunks>>> = OnceLock::new();

fn stdin_chunks() -> MutexGuard<'static, Option<InputChunks>> {
    STDIN_CHUNKS
        .get_or_init(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            let spawned = thread::Builder::new()
                .name("prompt-stdin".to_string())
                .spawn(move || pump_input(io::stdin(), &tx));
            match spawned {
                Ok(_) => {
                    tracing::debug!("stdin reader started");
                    Mutex::new(Some(rx))
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to start stdin reader");
                    Mutex::new(None)
                }
            }
        })
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Blocking read loop. Each read becomes one chunk; EOF is sent as an empty
/// chunk and ends the loop, as does a read error or a dropped receiver.
fn pump_input<R: Read>(mut source: R, tx: &mpsc::UnboundedSender<io::Result<Vec<u8>>>) {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    loop {
        match source.read(&mut buf) {
            Ok(n) => {
                if tx.send(Ok(buf[..n].to_vec())).is_err() || n == 0 {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                let _ = tx.send(Err(err));
                return;
            }
        }
    }
}

/// Used when the device size cannot be queried (e.g. output is not a tty).
const FALLBACK_SIZE: TerminalSize = TerminalSize { cols: 80, rows: 24 };

/// Inline line-diff repaint.
///
/// Remembers the last frame and the row the hardware cursor was left on,
/// and on each paint rewrites only from the first changed line down. The
/// prompt lives below whatever the shell printed before it; the screen is
/// never cleared above the frame.
#[derive(Debug, Default)]
struct LineRenderer {
    previous: Vec<String>,
    previous_cursor: Option<CursorPos>,
    /// Row of the frame the hardware cursor is on.
    cursor_row: usize,
}

impl LineRenderer {
    fn paint<W: Write>(&mut self, out: &mut W, frame: &Frame) -> io::Result<()> {
        if !self.previous.is_empty()
            && self.previous == frame.lines
            && self.previous_cursor == frame.cursor
        {
            return Ok(());
        }

        let common = self
            .previous
            .iter()
            .zip(&frame.lines)
            .take_while(|(old, new)| old == new)
            .count();
        let start = common
            .min(self.previous.len().saturating_sub(1))
            .min(frame.lines.len().saturating_sub(1));

        move_rows(out, self.cursor_row, start)?;
        queue!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        for (idx, line) in frame.lines.iter().enumerate().skip(start) {
            if idx > start {
                queue!(out, Print("\r\n"))?;
            }
            queue!(out, Print(line))?;
        }
        self.cursor_row = frame.lines.len().saturating_sub(1).max(start);

        if let Some(pos) = frame.cursor {
            let row = usize::from(pos.row).min(self.cursor_row);
            move_rows(out, self.cursor_row, row)?;
            queue!(out, MoveToColumn(pos.col))?;
            self.cursor_row = row;
        }

        out.flush()?;
        self.previous = frame.lines.clone();
        self.previous_cursor = frame.cursor;
        Ok(())
    }

    /// Paint `frame` and park the cursor on a fresh line below it. The next
    /// paint starts a new frame.
    fn settle<W: Write>(&mut self, out: &mut W, frame: &Frame) -> io::Result<()> {
        self.paint(out, frame)?;
        let last = frame.lines.len().saturating_sub(1);
        move_rows(out, self.cursor_row, last)?;
        queue!(out, Print("\r\n"))?;
        out.flush()?;
        *self = Self::default();
        Ok(())
    }
}

fn move_rows<W: Write>(out: &mut W, from: usize, to: usize) -> io::Result<()> {
    // crossterm turns a zero-row move into a one-row move
    let distance = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    if to < from {
        queue!(out, MoveUp(distance(from - to)))?;
    } else if to > from {
        queue!(out, MoveDown(distance(to - from)))?;
    }
    Ok(())
}

/// `TerminalPort` over the process's stdin/stdout using crossterm.
///
/// Stdin is read on a dedicated thread and forwarded over a channel, so a
/// `read_input` dropped by a timeout never leaves a read in flight.
pub struct CrosstermTerminal {
    input: Option<InputChunks>,
    stdout: io::Stdout,
    renderer: LineRenderer,
    owns_raw_mode: bool,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self {
            input: None,
            stdout: io::stdout(),
            renderer: LineRenderer::default(),
            owns_raw_mode: false,
        }
    }

    fn return_input(&mut self) {
        if let Some(input) = self.input.take() {
            *stdin_chunks() = Some(input);
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPort for CrosstermTerminal {
    fn acquire(&mut self) -> Result<(), PromptError> {
        RAW_MODE_OWNER
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PromptError::TerminalBusy)?;

        if self.input.is_none() {
            self.input = stdin_chunks().take();
        }
        if self.input.is_none() {
            RAW_MODE_OWNER.store(false, Ordering::Release);
            return Err(PromptError::Terminal(io::Error::other(
                "stdin reader is not running",
            )));
        }

        if let Err(err) = terminal::enable_raw_mode() {
            self.return_input();
            RAW_MODE_OWNER.store(false, Ordering::Release);
            return Err(err.into());
        }
        self.owns_raw_mode = true;
        self.renderer = LineRenderer::default();
        tracing::debug!("raw mode enabled");
        Ok(())
    }

    fn release(&mut self) -> Result<(), PromptError> {
        if !self.owns_raw_mode {
            return Ok(());
        }
        self.owns_raw_mode = false;
        let result = terminal::disable_raw_mode();
        self.return_input();
        RAW_MODE_OWNER.store(false, Ordering::Release);
        tracing::debug!("raw mode disabled");
        result.map_err(PromptError::from)
    }

    fn read_input(&mut self) -> impl Future<Output = Result<Vec<u8>, PromptError>> + Send {
        async move {
            let input = self.input.as_mut().ok_or_else(|| {
                PromptError::Terminal(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "terminal not acquired",
                ))
            })?;
            // recv is cancel-safe: a chunk not yet taken stays queued
            match input.recv().await {
                Some(chunk) => Ok(chunk?),
                None => Ok(Vec::new()),
            }
        }
    }

    fn size(&self) -> TerminalSize {
        terminal::size()
            .map(|(cols, rows)| TerminalSize::new(cols, rows))
            .unwrap_or(FALLBACK_SIZE)
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), PromptError> {
        self.renderer.paint(&mut self.stdout, frame)?;
        Ok(())
    }

    fn finish(&mut self, frame: &Frame) -> Result<(), PromptError> {
        self.renderer.settle(&mut self.stdout, frame)?;
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!(%err, "failed to leave raw mode");
        }
    }
}
