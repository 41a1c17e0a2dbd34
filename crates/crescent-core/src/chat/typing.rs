//! Typing presenter
//!
//! Simulates live streaming of an already-complete answer string. The model
//! response is not token-streamed; this is a presentation effect only. The
//! answer is replayed word by word into an explicit accumulator, and each
//! intermediate frame is pushed to a [`TypingSurface`] with a trailing
//! cursor marker. Word and line order of the input are preserved exactly.

use std::time::Duration;
use tokio::time::sleep;

/// Transient end-of-text cursor shown while a frame is in progress.
pub const CURSOR_MARKER: &str = "▌";

/// Marker appended after each input line (markdown hard line break).
pub const LINE_BREAK_MARKER: &str = "  \n";

/// Default pause between words.
pub const DEFAULT_WORD_DELAY: Duration = Duration::from_millis(50);

/// Single overwriteable display slot provided by the chat host.
///
/// `render` is called once per word with the whole in-progress buffer
/// (cursor included); each call replaces the previous frame. `finish` is
/// called exactly once with the final buffer, cursor stripped.
pub trait TypingSurface {
    fn render(&mut self, frame: &str);
    fn finish(&mut self, text: &str);
}

/// Replays answer text onto a surface with a fixed inter-word delay.
#[derive(Debug, Clone)]
pub struct TypingPresenter {
    delay: Duration,
}

impl Default for TypingPresenter {
    fn default() -> Self {
        Self {
            delay: DEFAULT_WORD_DELAY,
        }
    }
}

impl TypingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom inter-word delay (tests pass `Duration::ZERO`).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Stream `text` onto `surface` word by word and return the final
    /// buffer.
    ///
    /// Lines are split on `'\n'` and words on single spaces; every word is
    /// emitted with one trailing space and every line ends with
    /// [`LINE_BREAK_MARKER`]. The returned buffer equals
    /// [`final_form(text)`](final_form), so the rendered result is a
    /// deterministic reconstruction of the input's words and line
    /// structure. The per-word pause is cooperative and not cancellable
    /// mid-stream.
    pub async fn present<S: TypingSurface + Send>(&self, surface: &mut S, text: &str) -> String {
        let mut buffer = String::new();

        for line in text.split('\n') {
            for word in line.split(' ') {
                buffer.push_str(word);
                buffer.push(' ');
                sleep(self.delay).await;
                surface.render(&format!("{buffer}{CURSOR_MARKER}"));
            }
            buffer.push_str(LINE_BREAK_MARKER);
        }

        surface.finish(&buffer);
        buffer
    }
}

/// The deterministic final form of `text` under the presenter's
/// split/join rules: one trailing space per word, one
/// [`LINE_BREAK_MARKER`] per line.
pub fn final_form(text: &str) -> String {
    let mut buffer = String::new();
    for line in text.split('\n') {
        for word in line.split(' ') {
            buffer.push_str(word);
            buffer.push(' ');
        }
        buffer.push_str(LINE_BREAK_MARKER);
    }
    buffer
}
