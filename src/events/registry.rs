//! # Category registry: interns category names.
//!
//! [`CategoryRegistry`] maps names to [`Category`] ids. The built-in log names
//! are interned on construction, custom names get the next free id.
//!
//! ## Rules
//! - A name maps to the same id for the registry's lifetime.
//! - `register` is idempotent and never reuses an id.
//! - `lookup` never allocates; unknown names resolve to [`Category::UNKNOWN`].
//! - Id 0 is reserved for the sentinel but its name is not interned, so
//!   `register("UNKNOWN")` yields an ordinary, deliverable category.
//! - Ids are dense, so the reverse table is a plain `Vec` indexed by id.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::category::Category;

/// Reverse-table label of the sentinel; never a key of `by_name`.
const UNKNOWN_NAME: &str = "UNKNOWN";

const BUILTIN_NAMES: [(&str, Category); 3] = [
    ("LOG_DEBUG", Category::LOG_DEBUG),
    ("LOG_INFO", Category::LOG_INFO),
    ("LOG_WARNING", Category::LOG_WARNING),
];

struct Names {
    by_name: HashMap<Arc<str>, Category>,
    /// Reverse table; `by_id[c.id()]` is the name of `c`.
    by_id: Vec<Arc<str>>,
}

/// Thread-safe name → [`Category`] interner.
pub struct CategoryRegistry {
    names: RwLock<Names>,
}

impl CategoryRegistry {
    /// Creates a registry holding only the built-in categories.
    pub fn new() -> Self {
        let mut by_name = HashMap::with_capacity(BUILTIN_NAMES.len());
        let mut by_id: Vec<Arc<str>> = Vec::with_capacity(BUILTIN_NAMES.len() + 1);
        by_id.push(Arc::from(UNKNOWN_NAME));
        for (name, category) in BUILTIN_NAMES {
            let name: Arc<str> = Arc::from(name);
            by_name.insert(name.clone(), category);
            by_id.push(name);
        }
        Self {
            names: RwLock::new(Names { by_name, by_id }),
        }
    }

    /// Returns the id interned for `name`, or [`Category::UNKNOWN`].
    pub fn lookup(&self, name: &str) -> Category {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names
            .by_name
            .get(name)
            .copied()
            .unwrap_or(Category::UNKNOWN)
    }

    /// Returns the id for `name`, allocating the next one if it is new.
    pub fn register(&self, name: &str) -> Category {
        if let Some(existing) = self.find(name) {
            return existing;
        }

        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        // Raced with another writer between the read and the write lock.
        if let Some(existing) = names.by_name.get(name) {
            return *existing;
        }

        let category = Category::from_raw(names.by_id.len() as u32);
        let name: Arc<str> = Arc::from(name);
        names.by_name.insert(name.clone(), category);
        names.by_id.push(name.clone());

        debug!(category = %category, name = %name, "category registered");
        category
    }

    /// Returns the name a category was registered under.
    pub fn name_of(&self, category: Category) -> Option<Arc<str>> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.by_id.get(category.id() as usize).cloned()
    }

    /// Number of interned categories, built-ins included.
    pub fn len(&self) -> usize {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .len()
    }

    /// Always false: the built-ins are interned on construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn find(&self, name: &str) -> Option<Category> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.by_name.get(name).copied()
    }
}

impl std::fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
