//! Admin-editable page content: category tiles and social links.
//!
//! Both are replaced wholesale by the admin console.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::{Persistence, Repository};
use crate::model::{CategoryTile, SocialLinks};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryState {
    pub categories: Vec<CategoryTile>,
}

pub struct CategoryStore {
    state: CategoryState,
    persistence: Persistence<CategoryState>,
}

impl CategoryStore {
    pub fn load(
        repo: impl Repository<CategoryState> + 'static,
        key: &'static str,
        seed: impl FnOnce() -> Vec<CategoryTile>,
    ) -> Self {
        let persistence = Persistence::new(repo, key);
        let state = persistence
            .restore()
            .unwrap_or_else(|| CategoryState { categories: seed() });
        Self { state, persistence }
    }

    pub fn categories(&self) -> &[CategoryTile] {
        &self.state.categories
    }

    /// Replaces the whole tile set and saves it.
    pub fn update_categories(&mut self, categories: Vec<CategoryTile>) {
        debug!(count = categories.len(), "Category tiles replaced");
        self.state.categories = categories;
        self.persistence.save(&self.state);
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_active()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialState {
    pub social_links: SocialLinks,
}

pub struct SocialStore {
    state: SocialState,
    persistence: Persistence<SocialState>,
}

impl SocialStore {
    pub fn load(
        repo: impl Repository<SocialState> + 'static,
        key: &'static str,
        seed: impl FnOnce() -> SocialLinks,
    ) -> Self {
        let persistence = Persistence::new(repo, key);
        let state = persistence
            .restore()
            .unwrap_or_else(|| SocialState { social_links: seed() });
        Self { state, persistence }
    }

    pub fn links(&self) -> &SocialLinks {
        &self.state.social_links
    }

    pub fn update_links(&mut self, links: SocialLinks) {
        debug!("Social links replaced");
        self.state.social_links = links;
        self.persistence.save(&self.state);
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_active()
    }
}
