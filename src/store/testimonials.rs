//! Home page testimonials, managed from the admin console.

use super::{Record, ResourceStore};
use crate::error::ValidationError;
use crate::model::{Id, Testimonial, TestimonialDraft, TestimonialPatch};

pub type TestimonialStore = ResourceStore<Testimonial>;

impl Record for Testimonial {
    const COLLECTION: &'static str = "testimonials";
    type Draft = TestimonialDraft;
    type Patch = TestimonialPatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: TestimonialDraft) -> Self {
        Self {
            id,
            name: draft.name,
            location: draft.location,
            image: draft.image,
            rating: draft.rating,
            text: draft.text,
        }
    }

    fn apply(&mut self, patch: TestimonialPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
    }
}

fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::new("rating", "Rating must be between 1 and 5"));
    }
    Ok(())
}

/// Field rules of the admin testimonial form
///
/// 1. Name and text are required
/// 2. Rating is between 1 and 5
pub fn validate_draft(draft: &TestimonialDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name is required"));
    }
    if draft.text.trim().is_empty() {
        return Err(ValidationError::new("text", "Testimonial text is required"));
    }
    validate_rating(draft.rating)
}

/// Only the rating of an edit is checked.
pub fn validate_patch(patch: &TestimonialPatch) -> Result<(), ValidationError> {
    match patch.rating {
        Some(rating) => validate_rating(rating),
        None => Ok(()),
    }
}
