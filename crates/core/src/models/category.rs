use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::palette::ColorTag;

use super::record::RecordKind;

/// Icon shown for a record whose category no longer exists.
pub const FALLBACK_ICON: &str = "cash";

/// Color shown for a record whose category no longer exists.
pub const FALLBACK_COLOR: ColorTag = ColorTag::Gray;

/// A tag records can be filed under.
///
/// Names are unique within a kind: "Gifts" may exist once as an expense
/// category and once as an income category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub id: Uuid,

    /// Display name, also the key records refer to
    pub name: String,

    /// Symbolic icon name (e.g. "restaurant", "car")
    pub icon: String,

    pub color: ColorTag,

    /// Whether this category groups expenses or income
    pub kind: RecordKind,

    /// True for categories from the seeded default set
    #[serde(default)]
    pub is_default: bool,
}

impl CategoryDefinition {
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color: ColorTag,
        kind: RecordKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color,
            kind,
            is_default: false,
        }
    }

    /// Case- and whitespace-insensitive name match.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// The seed set used on first launch: six expense and four income categories.
    pub fn defaults() -> Vec<CategoryDefinition> {
        const SEED: [(&str, &str, ColorTag, RecordKind); 10] = [
            ("Food", "restaurant", ColorTag::Orange, RecordKind::Expense),
            ("Transport", "car", ColorTag::Blue, RecordKind::Expense),
            ("Shopping", "bag", ColorTag::Purple, RecordKind::Expense),
            ("Bills", "receipt", ColorTag::Red, RecordKind::Expense),
            ("Entertainment", "game-controller", ColorTag::Pink, RecordKind::Expense),
            ("Health", "medical", ColorTag::Green, RecordKind::Expense),
            ("Salary", "briefcase", ColorTag::Emerald, RecordKind::Income),
            ("Freelance", "laptop", ColorTag::Cyan, RecordKind::Income),
            ("Investment", "trending-up", ColorTag::Indigo, RecordKind::Income),
            ("Business", "business", ColorTag::Lime, RecordKind::Income),
        ];

        SEED.iter()
            .map(|&(name, icon, color, kind)| CategoryDefinition {
                is_default: true,
                ..CategoryDefinition::new(name, icon, color, kind)
            })
            .collect()
    }
}

/// How a record's category should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDisplay {
    pub icon: String,
    pub color: ColorTag,

    /// True when no definition with that name exists any more
    pub is_orphaned: bool,
}

impl CategoryDisplay {
    pub fn fallback() -> Self {
        Self {
            icon: FALLBACK_ICON.to_string(),
            color: FALLBACK_COLOR,
            is_orphaned: true,
        }
    }
}
