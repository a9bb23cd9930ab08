//! In-game message log.

use delve_core::Color;
use serde::{Deserialize, Serialize};

use crate::colors;

/// Entries kept before the oldest ones are dropped.
const MAX_MESSAGES: usize = 10_000;
/// Entries dropped at once when the cap is hit.
const TRIM_BATCH: usize = 1_000;

/// One log line, possibly repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub plain_text: String,
    pub fg: Color,
    pub count: u32,
}

impl Message {
    /// Text with a repeat suffix, e.g. `"Nothing to attack. (x3)"`.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.plain_text, self.count)
        } else {
            self.plain_text.clone()
        }
    }
}

/// Append-only, ordered message history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. With `stack`, a repeat of the last message bumps its
    /// counter instead of adding a line.
    pub fn add_message(&mut self, text: impl Into<String>, fg: Color, stack: bool) {
        let text = uppercase_first(&text.into());

        if stack {
            if let Some(last) = self.messages.last_mut() {
                if last.plain_text == text {
                    last.count += 1;
                    return;
                }
            }
        }

        self.messages.push(Message {
            plain_text: text,
            fg,
            count: 1,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.drain(0..TRIM_BATCH);
        }
    }

    /// Append a plain white, stacking message.
    pub fn add(&mut self, text: impl Into<String>) {
        self.add_message(text, colors::WHITE, true);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}
