use std::sync::Arc;

use dashmap::DashMap;

use crate::foundation::error::{PhotopostError, PhotopostResult};

pub type ChatId = i64;

/// What the chat's next photo will be turned into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    None,
    Post,
    Stats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ChatSession {
    processing: bool,
    mode: RenderMode,
}

impl ChatSession {
    fn is_idle(&self) -> bool {
        !self.processing && self.mode == RenderMode::None
    }
}

/// Per-chat admission control: at most one render in flight per chat.
///
/// Sessions are created on first use and dropped again once they hold nothing. Clones share
/// the same table.
#[derive(Clone, Debug, Default)]
pub struct SessionGuard {
    sessions: Arc<DashMap<ChatId, ChatSession>>,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `chat_id` busy. Returns `false` if a render is already in flight for it.
    pub fn try_start(&self, chat_id: ChatId) -> bool {
        let mut session = self.sessions.entry(chat_id).or_default();
        if session.processing {
            return false;
        }
        session.processing = true;
        true
    }

    /// Clear the busy flag. Safe to call when nothing is in flight.
    pub fn finish(&self, chat_id: ChatId) {
        if let Some(mut session) = self.sessions.get_mut(&chat_id) {
            session.processing = false;
        }
        self.sessions.remove_if(&chat_id, |_, s| s.is_idle());
    }

    pub fn is_processing(&self, chat_id: ChatId) -> bool {
        self.sessions
            .get(&chat_id)
            .is_some_and(|s| s.processing)
    }

    pub fn mode(&self, chat_id: ChatId) -> RenderMode {
        self.sessions
            .get(&chat_id)
            .map(|s| s.mode)
            .unwrap_or_default()
    }

    pub fn set_mode(&self, chat_id: ChatId, mode: RenderMode) {
        self.sessions.entry(chat_id).or_default().mode = mode;
        if mode == RenderMode::None {
            self.sessions.remove_if(&chat_id, |_, s| s.is_idle());
        }
    }

    /// Forget everything about `chat_id`, including an in-flight flag.
    pub fn reset(&self, chat_id: ChatId) {
        self.sessions.remove(&chat_id);
    }

    /// Number of chats with live state.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// [`Self::try_start`] returning a permit that finishes the chat when dropped.
    pub fn admit(&self, chat_id: ChatId) -> Option<RenderPermit> {
        self.try_start(chat_id).then(|| RenderPermit {
            guard: self.clone(),
            chat_id,
        })
    }

    /// Run `job` while holding the chat's permit.
    pub fn run_exclusive<T>(
        &self,
        chat_id: ChatId,
        job: impl FnOnce() -> PhotopostResult<T>,
    ) -> PhotopostResult<T> {
        let _permit = self
            .admit(chat_id)
            .ok_or(PhotopostError::AdmissionRejected { chat_id })?;
        job()
    }
}

/// Proof that a render for one chat is in flight. Dropping it releases the chat.
#[derive(Debug)]
#[must_use = "the chat is released as soon as the permit is dropped"]
pub struct RenderPermit {
    guard: SessionGuard,
    chat_id: ChatId,
}

impl RenderPermit {
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }
}

impl Drop for RenderPermit {
    fn drop(&mut self) {
        self.guard.finish(self.chat_id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/guard.rs"]
mod tests;
