use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use autocomplete_prompt::domain::primitive::{Frame, TerminalSize};
use autocomplete_prompt::{
    AutocompletePrompt, CancelReason, Choice, FuzzyMatcher, PromptConfig, PromptError,
    PromptOutcome, TerminalPort, Theme,
};
use pretty_assertions::assert_eq;

// =============================================================================
// In-memory terminal
// =============================================================================

#[derive(Debug, Default)]
struct Recording {
    acquired: usize,
    released: usize,
    frames: Vec<Frame>,
    summary: Option<Frame>,
}

/// Plays back keystrokes and records what the prompt shows. The recording
/// is shared so a test can inspect it after the terminal is dropped.
struct ReplayTerminal {
    input: VecDeque<Vec<u8>>,
    recording: Arc<Mutex<Recording>>,
    cols: u16,
}

impl ReplayTerminal {
    fn new(input: &[&[u8]]) -> (Self, Arc<Mutex<Recording>>) {
        let recording = Arc::new(Mutex::new(Recording::default()));
        let terminal = Self {
            input: input.iter().map(|chunk| chunk.to_vec()).collect(),
            recording: Arc::clone(&recording),
            cols: 80,
        };
        (terminal, recording)
    }
}

impl TerminalPort for ReplayTerminal {
    fn acquire(&mut self) -> Result<(), PromptError> {
        self.recording.lock().unwrap().acquired += 1;
        Ok(())
    }

    fn release(&mut self) -> Result<(), PromptError> {
        self.recording.lock().unwrap().released += 1;
        Ok(())
    }

    fn read_input(&mut self) -> impl Future<Output = Result<Vec<u8>, PromptError>> + Send {
        let next = self.input.pop_front();
        async move {
            match next {
                Some(chunk) => Ok(chunk),
                None => std::future::pending().await,
            }
        }
    }

    fn size(&self) -> TerminalSize {
        TerminalSize::new(self.cols, 24)
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), PromptError> {
        self.recording.lock().unwrap().frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self, frame: &Frame) -> Result<(), PromptError> {
        self.recording.lock().unwrap().summary = Some(frame.clone());
        Ok(())
    }
}

const UP: &[u8] = b"\x1b[A";
const DOWN: &[u8] = b"\x1b[B";
const ENTER: &[u8] = b"\r";
const ESC: &[u8] = b"\x1b";
const BACKSPACE: &[u8] = b"\x7f";

fn flavors() -> PromptConfig<String> {
    PromptConfig::<String>::builder("flavor", "Pick your favorite flavor")
        .choices([
            "almond",
            "apple",
            "banana",
            "cherry",
            "chocolate",
            "cinnamon",
            "coconut",
            "cotton candy",
            "grape",
            "nougat",
            "orange",
            "pear",
            "pineapple",
            "strawberry",
            "vanilla",
            "watermelon",
            "wintergreen",
        ])
        .limit(5)
        .highlight(|s: &str| format!("<{s}>"))
        .escape_timeout(Duration::from_millis(5))
        .build()
}

fn fruit(choices: &[&str]) -> PromptConfig<String> {
    PromptConfig::<String>::builder("fruit", "Pick a fruit")
        .choices(choices.iter().copied())
        .escape_timeout(Duration::from_millis(5))
        .build()
}

async fn run<V: Clone>(
    config: PromptConfig<V>,
    input: &[&[u8]],
) -> (Result<PromptOutcome<V>, PromptError>, Recording) {
    let (mut terminal, recording) = ReplayTerminal::new(input);
    let prompt = AutocompletePrompt::new(config).with_theme(Theme::plain());
    let result = prompt.run(&mut terminal).await;
    drop(terminal);
    let recording = std::mem::take(&mut *recording.lock().unwrap());
    (result, recording)
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn typing_ap_then_enter_answers_apple() {
    let input: &[&[u8]] = &[b"a", b"p", ENTER];
    let (result, recording) = run(fruit(&["apple", "banana", "grape"]), input).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer("apple".to_string()));
    let last = recording.frames.last().unwrap();
    assert_eq!(last.lines[0], "? Pick a fruit \u{203A} ap");
    assert_eq!(
        last.lines[1..].to_vec(),
        vec!["\u{276F} apple".to_string(), "  grape".to_string()]
    );
    assert_eq!(recording.acquired, 1);
    assert_eq!(recording.released, 1);
}

#[tokio::test]
async fn no_match_enter_is_ignored_and_escape_cancels() {
    let (result, recording) = run(fruit(&["apple", "banana"]), &[b"z", ENTER, ESC]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Cancelled(CancelReason::Escape));
    let last = recording.frames.last().unwrap();
    assert_eq!(last.lines[1], "  No matching choices");
    assert_eq!(
        recording.summary.unwrap().lines,
        vec!["\u{2716} Pick a fruit".to_string()]
    );
    assert_eq!(recording.released, 1);
}

#[tokio::test]
async fn empty_choices_fail_before_terminal_is_touched() {
    let (result, recording) = run(fruit(&[]), &[ENTER]).await;

    let err = result.unwrap_err();
    assert!(err.is_config_error());
    assert!(matches!(err, PromptError::EmptyChoices { ref name } if name == "fruit"));
    assert_eq!(recording.acquired, 0);
    assert!(recording.frames.is_empty());
}

#[tokio::test]
async fn zero_limit_is_a_config_error() {
    let config = PromptConfig::<String>::builder("fruit", "Pick")
        .choices(["apple"])
        .limit(0)
        .build();
    let (result, recording) = run(config, &[ENTER]).await;

    assert!(matches!(result, Err(PromptError::InvalidLimit { .. })));
    assert_eq!(recording.acquired, 0);
}

#[tokio::test]
async fn window_scrolls_with_the_cursor_and_wraps() {
    let (result, recording) = run(flavors(), &[DOWN, DOWN, DOWN, DOWN, DOWN, ENTER]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer("cinnamon".to_string()));
    let last = recording.frames.last().unwrap();
    assert_eq!(
        last.lines[1..].to_vec(),
        vec![
            "  apple".to_string(),
            "  banana".to_string(),
            "  cherry".to_string(),
            "  chocolate".to_string(),
            "\u{276F} cinnamon".to_string(),
        ]
    );

    let (result, _) = run(flavors(), &[UP, ENTER]).await;
    assert_eq!(result.unwrap(), PromptOutcome::Answer("wintergreen".to_string()));
}

#[tokio::test]
async fn highlight_wraps_only_the_matched_segment() {
    let (result, recording) = run(flavors(), &[b"ap", ENTER]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer("apple".to_string()));
    let last = recording.frames.last().unwrap();
    assert_eq!(
        last.lines[1..].to_vec(),
        vec![
            "\u{276F} <ap>ple".to_string(),
            "  gr<ap>e".to_string(),
            "  pine<ap>ple".to_string(),
        ]
    );
}

#[tokio::test]
async fn backspace_widens_the_filter_again() {
    let input: &[&[u8]] = &[b"gr", BACKSPACE, BACKSPACE, DOWN, ENTER];
    let (result, _) = run(fruit(&["apple", "banana", "grape"]), input).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer("banana".to_string()));
}

#[tokio::test]
async fn page_keys_and_home_end_navigate() {
    let page_down = b"\x1b[6~".as_slice();
    let end = b"\x1b[F".as_slice();
    let home = b"\x1b[H".as_slice();

    let (result, _) = run(flavors(), &[page_down, ENTER]).await;
    assert_eq!(result.unwrap(), PromptOutcome::Answer("cinnamon".to_string()));

    let (result, _) = run(flavors(), &[end, ENTER]).await;
    assert_eq!(result.unwrap(), PromptOutcome::Answer("wintergreen".to_string()));

    let (result, _) = run(flavors(), &[end, home, ENTER]).await;
    assert_eq!(result.unwrap(), PromptOutcome::Answer("almond".to_string()));
}

#[tokio::test]
async fn ctrl_c_rejects_with_interrupt() {
    let (result, recording) = run(flavors(), &[b"ch", b"\x03"]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Cancelled(CancelReason::Interrupt));
    assert_eq!(recording.released, 1);
}

#[tokio::test]
async fn escape_then_ctrl_c_in_one_read_cancels_with_escape() {
    let (result, recording) = run(flavors(), &[b"\x1b\x03"]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Cancelled(CancelReason::Escape));
    assert_eq!(recording.released, 1);
}

#[tokio::test]
async fn multibyte_input_split_across_reads() {
    let bytes = "\u{00E9}".as_bytes();
    let config = fruit(&["caf\u{00E9}", "tea"]);
    let (result, _) = run(config, &[&bytes[..1], &bytes[1..], ENTER]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer("caf\u{00E9}".to_string()));
}

#[tokio::test]
async fn fuzzy_matcher_ranks_by_score() {
    let config = PromptConfig::<String>::builder("flavor", "Pick")
        .choices(["cotton candy", "coconut", "chocolate"])
        .matcher(FuzzyMatcher)
        .build();
    let (result, _) = run(config, &[b"coc", ENTER]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer("coconut".to_string()));
}

#[tokio::test]
async fn structured_choices_resolve_to_their_values() {
    let config = PromptConfig::<u16>::builder("port", "Pick a port")
        .choice(Choice::new("http", 80).with_hint("plain"))
        .choice(Choice::new("https", 443).with_hint("tls"))
        .initial(1)
        .build();
    let (result, recording) = run(config, &[ENTER]).await;

    assert_eq!(result.unwrap(), PromptOutcome::Answer(443));
    assert_eq!(
        recording.frames[0].lines[1..].to_vec(),
        vec!["  http plain".to_string(), "\u{276F} https tls".to_string()]
    );
    assert_eq!(
        recording.summary.unwrap().lines,
        vec!["\u{2714} Pick a port \u{00B7} https".to_string()]
    );
}

#[tokio::test]
async fn panicking_highlight_is_reported_and_terminal_released() {
    let config = PromptConfig::<String>::builder("fruit", "Pick")
        .choices(["apple"])
        .highlight(|_: &str| -> String { panic!("highlight exploded") })
        .build();
    let (result, recording) = run(config, &[b"a"]).await;

    let err = result.unwrap_err();
    assert!(matches!(err, PromptError::Render(_)));
    assert!(!err.is_config_error());
    assert_eq!(recording.released, 1);
}
