//! Domain types and the pure building blocks of the directory engine.

pub mod aggregator;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod registry;
pub mod source;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared trade or role of a professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metier {
    pub id: String,
    pub name: String,
}

/// The canonical professional record every backend shape is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub specialty: Option<String>,
    pub city: Option<String>,
    pub avatar: Option<String>,
    pub metiers: Vec<Metier>,
    pub bio: Option<String>,
    pub verified: Option<bool>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl Professional {
    /// Creates a record with only an id and a display name set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialty: None,
            city: None,
            avatar: None,
            metiers: Vec::new(),
            bio: None,
            verified: None,
            rating: None,
            review_count: None,
        }
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_metier(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.metiers.push(Metier {
            id: id.into(),
            name: name.into(),
        });
        self
    }
}

/// A named category with the keywords that decide membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub slug: String,
    /// Lowercase substrings, never empty.
    pub keywords: Vec<String>,
}

/// Selects either every professional or a single category by slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryFilter {
    All,
    Slug(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Slug(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL,
            CategoryFilter::Slug(slug) => slug,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::parse(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search parameters sent to the backend along with a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFilters {
    pub search: String,
    pub location: String,
}

impl FetchFilters {
    pub fn new(search: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            location: location.into(),
        }
    }
}

pub use aggregator::{category_tiles, count_by_category, filter_by_category, CategoryTile};
pub use error::{FetchError, RegistryError};
pub use matcher::CategoryMatcher;
pub use normalize::normalize_professionals;
pub use registry::{CategoryRegistry, ProfessionType};
pub use source::{HttpProfessionalSource, ProfessionalSource};
