//! Clothing catalog rows and category buckets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a catalog row, numeric or textual depending on the table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(id) => write!(f, "{id}"),
            ItemId::Text(id) => f.write_str(id),
        }
    }
}

/// One row of the `clothes` table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClothingItem {
    pub id: ItemId,
    pub name: String,
    /// Category as stored; see [`Category::parse`] for the recognized values
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ClothingItem {
    /// Recognized category of this item, if any
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }
}

/// Outfit slots the recommender knows about
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Outer,
    Shoes,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Top,
        Category::Bottom,
        Category::Outer,
        Category::Shoes,
    ];

    /// Case-insensitive match against the four slot names
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "top" => Some(Category::Top),
            "bottom" => Some(Category::Bottom),
            "outer" => Some(Category::Outer),
            "shoes" => Some(Category::Shoes),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Outer => "outer",
            Category::Shoes => "shoes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog items partitioned by recognized category
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClothingBuckets {
    pub top: Vec<ClothingItem>,
    pub bottom: Vec<ClothingItem>,
    pub outer: Vec<ClothingItem>,
    pub shoes: Vec<ClothingItem>,
}

impl ClothingBuckets {
    /// Partition items; anything outside the four categories is dropped
    #[must_use]
    pub fn from_items(items: &[ClothingItem]) -> Self {
        let mut buckets = Self::default();
        for item in items {
            if let Some(category) = item.category() {
                buckets.bucket_mut(category).push(item.clone());
            }
        }
        buckets
    }

    #[must_use]
    pub fn bucket(&self, category: Category) -> &[ClothingItem] {
        match category {
            Category::Top => &self.top,
            Category::Bottom => &self.bottom,
            Category::Outer => &self.outer,
            Category::Shoes => &self.shoes,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<ClothingItem> {
        match category {
            Category::Top => &mut self.top,
            Category::Bottom => &mut self.bottom,
            Category::Outer => &mut self.outer,
            Category::Shoes => &mut self.shoes,
        }
    }

    /// Number of items that landed in any bucket
    #[must_use]
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
