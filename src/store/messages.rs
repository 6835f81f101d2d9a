//! Contact-form inbox
//!
//! Submissions arrive unread and are listed newest first. Opening a
//! message in the admin console marks it read; nothing ever marks it
//! unread again.

use chrono::NaiveDate;

use super::{Record, ResourceStore};
use crate::error::ValidationError;
use crate::model::{ContactRequest, Id, Message, MessageDraft, MessagePatch};

/// Contact-form inbox; newest submissions first.
pub type MessageStore = ResourceStore<Message>;

impl Record for Message {
    const COLLECTION: &'static str = "messages";
    const NEWEST_FIRST: bool = true;
    type Draft = MessageDraft;
    type Patch = MessagePatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: MessageDraft) -> Self {
        let ContactRequest {
            name,
            email,
            subject,
            message,
        } = draft.request;
        Self {
            id,
            name,
            email,
            subject,
            message,
            date: draft.received,
            read: false,
        }
    }

    fn apply(&mut self, patch: MessagePatch) {
        if let Some(read) = patch.read {
            self.read = read;
        }
    }
}

impl ResourceStore<Message> {
    /// Files a contact request received on `received`.
    ///
    /// # Returns
    ///
    /// The stored message with its new id and `read: false`.
    pub fn add_message(&mut self, request: ContactRequest, received: NaiveDate) -> Message {
        self.add(MessageDraft { request, received })
    }

    /// Marks message `id` read. `None` when no such message exists.
    pub fn mark_as_read(&mut self, id: Id) -> Option<Message> {
        self.update(id, MessagePatch { read: Some(true) })
    }

    pub fn unread_count(&self) -> usize {
        self.all().iter().filter(|m| !m.read).count()
    }
}

/// Every contact-form field must be filled in.
pub fn validate_contact(request: &ContactRequest) -> Result<(), ValidationError> {
    let required = [
        ("name", &request.name),
        ("email", &request.email),
        ("subject", &request.subject),
        ("message", &request.message),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
    }
    if !request.email.contains('@') {
        return Err(ValidationError::new("email", "Please enter a valid email address"));
    }
    Ok(())
}
