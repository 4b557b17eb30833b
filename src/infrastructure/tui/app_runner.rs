use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::domain::model::{PromptConfig, PromptOutcome};
use crate::domain::primitive::KeyAction;
use crate::infrastructure::tui::input::KeyDecoder;
use crate::infrastructure::tui::terminal_guard::TerminalGuard;
use crate::infrastructure::tui::widgets::{self, Theme};
use crate::interface_adapter::controller::prompt_controller::PromptController;
use crate::interface_adapter::port::TerminalPort;
use crate::shared::error::PromptError;
use crate::usecase::prompt_usecase::{PromptUsecase, Resolution, Step};

/// Run one prompt to completion on `terminal`.
///
/// The configuration is validated before the terminal is touched. Raw mode
/// is held by a [`TerminalGuard`] for the rest of the run, so it is given
/// back on every exit path: answer, cancellation, I/O error, a panicking
/// highlight transform or matcher, and the returned future being dropped.
pub async fn run<V: Clone, T: TerminalPort>(
    config: &PromptConfig<V>,
    terminal: &mut T,
    theme: &Theme,
) -> Result<PromptOutcome<V>, PromptError> {
    config.validate()?;

    // === Initialization ===
    let mut guard = TerminalGuard::acquire(terminal)?;
    let mut controller = PromptController::new(PromptUsecase::new(config));
    let mut decoder = KeyDecoder::new();
    tracing::debug!(prompt = config.name(), choices = config.choices().len(), "prompt started");

    // === Main loop ===
    let result = main_loop(&mut *guard, &mut controller, &mut decoder, theme)
        .await
        .and_then(|resolution| {
            let width = guard.size().cols;
            let frame = contain_panic("summary render", || {
                widgets::render_summary(config, resolution, theme, width)
            })?;
            guard.finish(&frame)?;
            Ok(resolution)
        });

    // === Cleanup (always runs) ===
    let released = guard.release();
    let resolution = result?;
    released?;

    tracing::debug!(prompt = config.name(), ?resolution, "prompt finished");
    controller
        .usecase()
        .outcome()
        .ok_or_else(|| PromptError::Render(format!("resolved to unknown choice: {resolution:?}")))
}

async fn main_loop<V, T: TerminalPort>(
    terminal: &mut T,
    controller: &mut PromptController<'_, V>,
    decoder: &mut KeyDecoder,
    theme: &Theme,
) -> Result<Resolution, PromptError> {
    draw(terminal, controller, theme)?;
    let escape_timeout = controller.usecase().config().escape_timeout();

    loop {
        // 1. Read: a pending partial sequence only waits `escape_timeout`
        // for its remaining bytes.
        let chunk = if decoder.has_pending() {
            match tokio::time::timeout(escape_timeout, terminal.read_input()).await {
                Ok(chunk) => Some(chunk?),
                Err(_elapsed) => None,
            }
        } else {
            Some(terminal.read_input().await?)
        };

        // 2. Decode
        let (actions, closed): (Vec<KeyAction>, bool) = match chunk {
            Some(bytes) if bytes.is_empty() => (decoder.flush(), true),
            Some(bytes) => (decoder.feed(&bytes), false),
            None => (decoder.flush(), false),
        };

        // 3. Apply
        match contain_panic("key dispatch", || controller.dispatch_all(actions))? {
            Step::Finished(resolution) => return Ok(resolution),
            Step::Redraw => draw(terminal, controller, theme)?,
            Step::Idle => {}
        }

        if closed {
            tracing::debug!("input closed before the prompt was answered");
            return Err(PromptError::InputClosed);
        }
    }
}

fn draw<V, T: TerminalPort>(
    terminal: &mut T,
    controller: &PromptController<'_, V>,
    theme: &Theme,
) -> Result<(), PromptError> {
    let usecase = controller.usecase();
    let width = terminal.size().cols;
    let frame = contain_panic("render", || {
        widgets::render(usecase.config(), usecase.selection(), theme, width)
    })?;
    tracing::trace!(lines = frame.height(), "redraw");
    terminal.draw(&frame)
}

/// Turn a panic in caller-supplied code (highlight transform, matcher) into
/// a `Render` error so the run can still release the terminal and reject.
fn contain_panic<R>(stage: &str, f: impl FnOnce() -> R) -> Result<R, PromptError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        tracing::error!(stage, %reason, "prompt callback panicked");
        PromptError::Render(format!("{stage}: {reason}"))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
