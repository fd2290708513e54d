/// Outcome of screening one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationVerdict {
    pub blocked: bool,
    pub reason: Option<String>,
    /// Set when the message is allowed but carries no on-topic signal.
    pub needs_context_check: bool,
}

impl ModerationVerdict {
    pub fn allowed() -> Self {
        Self {
            blocked: false,
            reason: None,
            needs_context_check: false,
        }
    }

    pub fn flagged() -> Self {
        Self {
            blocked: false,
            reason: None,
            needs_context_check: true,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            blocked: true,
            reason: Some(reason.into()),
            needs_context_check: false,
        }
    }
}
