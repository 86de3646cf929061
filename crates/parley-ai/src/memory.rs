//! Bounded chat memory.
//!
//! A sliding window over the most recent messages. The system message, when
//! present, is pinned at the head and never evicted; it counts toward the
//! capacity like any other message.

use std::collections::VecDeque;

use crate::{Message, Role};

/// Default window size.
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Smallest window that still fits a system message and one question.
const MIN_MAX_MESSAGES: usize = 2;

#[derive(Debug, Clone)]
pub struct ChatMemory {
    system: Option<Message>,
    turns: VecDeque<Message>,
    max_messages: usize,
}

impl ChatMemory {
    pub fn with_max_messages(max_messages: usize) -> Self {
        let max_messages = max_messages.max(MIN_MAX_MESSAGES);
        Self {
            system: None,
            turns: VecDeque::with_capacity(max_messages),
            max_messages,
        }
    }

    /// Add a message, evicting the oldest non-system messages if the window
    /// overflows.
    ///
    /// A system message replaces the current one.
    pub fn add(&mut self, message: Message) {
        match message.role {
            Role::System => {
                if self.system.as_ref() != Some(&message) {
                    self.system = Some(message);
                }
            }
            Role::User | Role::Assistant => self.turns.push_back(message),
        }
        self.ensure_capacity();
    }

    fn ensure_capacity(&mut self) {
        while self.len() > self.max_messages {
            if self.turns.pop_front().is_none() {
                break;
            }
        }
    }

    pub fn clear(&mut self) {
        self.system = None;
        self.turns.clear();
    }

    /// Drop conversation turns but keep the system message.
    pub fn clear_turns(&mut self) {
        self.turns.clear();
    }

    /// Messages in window order: system first, then turns oldest to newest.
    pub fn messages(&self) -> Vec<Message> {
        self.system
            .iter()
            .chain(self.turns.iter())
            .cloned()
            .collect()
    }

    pub fn system_message(&self) -> Option<&Message> {
        self.system.as_ref()
    }

    pub fn len(&self) -> usize {
        self.turns.len() + usize::from(self.system.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }
}

impl Default for ChatMemory {
    fn default() -> Self {
        Self::with_max_messages(DEFAULT_MAX_MESSAGES)
    }
}
