use crate::catalog::SharedCatalog;
use crate::error::Result;
use crate::store::{CommunityTab, StateKey, Store};

use super::Toasts;

/// Likes, tabs and the placeholder post/challenge actions.
///
/// Like flags live in the catalog and the tab key is not watched by the
/// render dispatcher, so both redraw by re-writing the current route.
#[derive(Clone)]
pub struct CommunityService {
    store: Store,
    catalog: SharedCatalog,
    toasts: Toasts,
}

impl CommunityService {
    pub fn new(store: Store, catalog: SharedCatalog, toasts: Toasts) -> Self {
        Self {
            store,
            catalog,
            toasts,
        }
    }

    /// Flip the like flag on `post_id` and adjust its count.
    ///
    /// Returns `Ok(false)` for an unknown post.
    pub fn toggle_like(&self, post_id: &str) -> Result<bool> {
        {
            let mut catalog = self.catalog.borrow_mut();
            let Some(post) = catalog.post_mut(post_id) else {
                tracing::debug!(post = post_id, "like ignored: unknown post");
                return Ok(false);
            };
            post.liked = !post.liked;
            if post.liked {
                post.likes += 1;
            } else {
                post.likes = post.likes.saturating_sub(1);
            }
            tracing::info!(post = post_id, liked = post.liked, likes = post.likes, "like toggled");
        }
        self.store.touch(StateKey::CurrentRoute)?;
        Ok(true)
    }

    pub fn set_tab(&self, tab: CommunityTab) -> Result<()> {
        self.store.write(StateKey::CommunityTab, tab)?;
        self.store.touch(StateKey::CurrentRoute)
    }

    pub fn create_post(&self) {
        self.toasts.show("Post creation feature coming soon! 📝");
    }

    pub fn join_challenge(&self, challenge_id: &str) {
        tracing::info!(challenge = challenge_id, "challenge joined");
        self.toasts.show("Successfully joined the challenge! 🎉");
    }
}
