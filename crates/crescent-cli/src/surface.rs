//! Terminal typing surface
//!
//! Renders presenter frames as a growing line on stdout. Frames arrive as
//! the whole in-progress buffer, so only the unseen suffix is printed;
//! the cursor marker is dropped rather than drawn (the terminal has its
//! own cursor).

use crescent_core::chat::{CURSOR_MARKER, TypingSurface};
use std::io::{self, Write};

/// Write-through surface for one assistant turn.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    printed: usize,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TypingSurface for TerminalSurface {
    fn render(&mut self, frame: &str) {
        let frame = frame.strip_suffix(CURSOR_MARKER).unwrap_or(frame);
        // Frames only ever extend the previous one.
        if frame.len() > self.printed {
            print!("{}", &frame[self.printed..]);
            io::stdout().flush().ok();
            self.printed = frame.len();
        }
    }

    fn finish(&mut self, text: &str) {
        if text.len() > self.printed {
            print!("{}", &text[self.printed..]);
        }
        println!();
        io::stdout().flush().ok();
        self.printed = text.len();
    }
}
