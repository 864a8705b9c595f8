//! Mock storefront data.
//!
//! The catalog is plain data: products, community posts, challenges,
//! categories, the signed-in user and a leaderboard. Lookups by identifier
//! return `None` on a miss; the name helpers fall back to the identifier
//! itself.

mod data;
mod model;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;

use crate::error::{Error, Result};

pub use model::{
    Category, Challenge, LeaderboardEntry, Post, Product, SustainabilityScore, UserProfile,
};

/// Catalog shared between the view layer and the services that mutate post
/// state.
pub type SharedCatalog = Rc<RefCell<Catalog>>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub user: UserProfile,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Catalog {
    /// The built-in demo data set.
    pub fn builtin() -> Self {
        data::builtin()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            posts = catalog.posts.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn shared(self) -> SharedCatalog {
        Rc::new(RefCell::new(self))
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn post_mut(&mut self, id: &str) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.category(id).map_or(id, |c| c.name.as_str())
    }

    pub fn challenge_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.challenge(id).map_or(id, |c| c.name.as_str())
    }

    /// Products whose name or description contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
