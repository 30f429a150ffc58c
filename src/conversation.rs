//! Conversation state
//!
//! An ordered list of turns plus the draft input buffer and the processing
//! flag. Owned exclusively by the chat orchestrator; rendering code reads it.

use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The local user (typed or spoken input)
    User,
    /// The remote assistant
    Assistant,
}

impl Role {
    /// Display name for the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in the conversation
///
/// Immutable once created; appended in arrival order, never mutated or
/// removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Unique id within a conversation (UUID v4)
    pub id: String,
    /// Attribution
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Turn {
    /// Create a user turn with a fresh id
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant turn with a fresh id
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }
}

/// Ordered conversation history plus transient input state
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
    draft: String,
    processing: bool,
}

impl Conversation {
    /// Create an empty conversation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn (insertion order is display order)
    pub fn push(&mut self, turn: Turn) {
        debug_assert!(
            self.turns.iter().all(|t| t.id != turn.id),
            "turn ids must be unique within a conversation"
        );
        tracing::debug!(role = turn.role.as_str(), id = %turn.id, "turn appended");
        self.turns.push(turn);
    }

    /// All turns, oldest first
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn, if any
    #[must_use]
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Current draft input text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Clear the draft input text
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// True while a backend request is outstanding
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// Set the processing flag
    pub const fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_append_in_order() {
        let mut conversation = Conversation::new();
        conversation.push(Turn::user("hello"));
        conversation.push(Turn::assistant("hi"));

        let turns = conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "hello");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "hi");
    }

    #[test]
    fn turn_ids_are_unique() {
        let a = Turn::user("a");
        let b = Turn::user("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn draft_replaces_not_appends() {
        let mut conversation = Conversation::new();
        conversation.set_draft("hel");
        conversation.set_draft("hello");
        assert_eq!(conversation.draft(), "hello");

        conversation.clear_draft();
        assert_eq!(conversation.draft(), "");
    }

    #[test]
    fn processing_defaults_to_false() {
        let mut conversation = Conversation::new();
        assert!(!conversation.is_processing());

        conversation.set_processing(true);
        assert!(conversation.is_processing());
    }
}
