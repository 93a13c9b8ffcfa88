use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::{CategoryDefinition, CategoryDisplay};
use crate::models::ledger::Ledger;
use crate::models::record::RecordKind;

/// Category definitions: seeding, creation, deletion and display lookup.
///
/// Records reference categories by name. Nothing here ever touches a
/// record, so deleting a category leaves its records as they were.
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Seed the default categories if no category list was ever stored.
    /// Returns `true` if seeding happened.
    ///
    /// A list the user emptied stays empty.
    pub fn ensure_defaults(&self, ledger: &mut Ledger) -> bool {
        if ledger.categories_initialised {
            return false;
        }
        ledger.categories_initialised = true;
        if !ledger.categories.is_empty() {
            return false;
        }
        ledger.categories = CategoryDefinition::defaults();
        info!(count = ledger.categories.len(), "seeded default categories");
        true
    }

    /// Add a category. Names must be non-blank and unique within their kind.
    pub fn add_category(&self, ledger: &mut Ledger, category: CategoryDefinition) -> Result<(), CoreError> {
        let name = category.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Category name must not be empty".into()));
        }
        if self.find_by_name(&ledger.categories, &name, category.kind).is_some() {
            return Err(CoreError::DuplicateCategory {
                name,
                kind: category.kind,
            });
        }
        if ledger.categories.iter().any(|c| c.id == category.id) {
            return Err(CoreError::ValidationError(format!(
                "Category {} already exists",
                category.id
            )));
        }

        debug!(name = %name, kind = %category.kind, "category added");
        ledger.categories.push(CategoryDefinition { name, ..category });
        ledger.categories_initialised = true;
        Ok(())
    }

    /// Delete a category definition. Records filed under it keep their
    /// category name and are still counted everywhere.
    pub fn delete_category(&self, ledger: &mut Ledger, category_id: Uuid) -> Result<CategoryDefinition, CoreError> {
        let idx = ledger
            .categories
            .iter()
            .position(|c| c.id == category_id)
            .ok_or_else(|| CoreError::CategoryNotFound(category_id.to_string()))?;
        let removed = ledger.categories.remove(idx);
        ledger.categories_initialised = true;
        debug!(name = %removed.name, "category deleted");
        Ok(removed)
    }

    /// Replace the category list wholesale, enforcing per-kind uniqueness.
    pub fn replace_all(&self, ledger: &mut Ledger, categories: Vec<CategoryDefinition>) -> Result<(), CoreError> {
        for (i, category) in categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(CoreError::ValidationError("Category name must not be empty".into()));
            }
            let clash = categories[..i]
                .iter()
                .any(|c| c.kind == category.kind && c.matches_name(&category.name));
            if clash {
                return Err(CoreError::DuplicateCategory {
                    name: category.name.trim().to_string(),
                    kind: category.kind,
                });
            }
        }
        ledger.categories = categories;
        ledger.categories_initialised = true;
        Ok(())
    }

    /// Categories of one kind, in stored order.
    pub fn categories_of_kind<'a>(
        &self,
        categories: &'a [CategoryDefinition],
        kind: RecordKind,
    ) -> Vec<&'a CategoryDefinition> {
        categories.iter().filter(|c| c.kind == kind).collect()
    }

    /// Find a category by name within a kind (case-insensitive).
    pub fn find_by_name<'a>(
        &self,
        categories: &'a [CategoryDefinition],
        name: &str,
        kind: RecordKind,
    ) -> Option<&'a CategoryDefinition> {
        categories
            .iter()
            .find(|c| c.kind == kind && c.matches_name(name))
    }

    /// The stored spelling of `name` if a definition of `kind` matches it.
    pub fn canonical_name<'a>(
        &self,
        categories: &'a [CategoryDefinition],
        name: &str,
        kind: RecordKind,
    ) -> Option<&'a str> {
        self.find_by_name(categories, name, kind)
            .map(|c| c.name.as_str())
    }

    /// Icon and color to draw for a category name, falling back to the
    /// generic look when no definition with that name exists.
    ///
    /// Lookup prefers a definition of the record's own kind, then any kind.
    pub fn resolve_display(
        &self,
        categories: &[CategoryDefinition],
        name: &str,
        kind: RecordKind,
    ) -> CategoryDisplay {
        self.find_by_name(categories, name, kind)
            .or_else(|| categories.iter().find(|c| c.matches_name(name)))
            .map(|c| CategoryDisplay {
                icon: c.icon.clone(),
                color: c.color,
                is_orphaned: false,
            })
            .unwrap_or_else(CategoryDisplay::fallback)
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
