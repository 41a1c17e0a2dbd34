//! Chat session state, turn handling, and typing presentation.

pub mod engine;
pub mod session;
pub mod typing;

pub use engine::ChatEngine;
pub use session::{ChatTurn, Role, SessionLog};
pub use typing::{CURSOR_MARKER, TypingPresenter, TypingSurface};

use rand::seq::SliceRandom;

/// Canned session-opening greetings.
const GREETINGS: &[&str] = &[
    "Hello there! How can I assist you today?",
    "Hi, human! Is there anything I can help you with?",
    "Do you need help?",
];

/// Pick a greeting for a fresh session, uniformly at random.
pub fn greeting() -> &'static str {
    GREETINGS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GREETINGS[0])
}
