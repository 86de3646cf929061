//! Conversation session management.
//!
//! A `Session` owns one conversation: the bounded chat memory, the active
//! system role, and a handle to the remote model.

mod chat;
mod manager;

#[cfg(test)]
mod tests;

pub use manager::Session;
