//! Decides whether a professional belongs to a category.

use super::registry::CategoryRegistry;
use super::{Category, CategoryFilter, Professional};
use rayon::prelude::*;

/// Keyword matching over the trade fields of a `Professional`.
///
/// This struct is stateless and provides methods as associated functions.
/// Only `metiers[].name` and `specialty` are consulted; the display name is not.
pub struct CategoryMatcher;

impl CategoryMatcher {
    /// True if any declared trade or the specialty contains any of the category keywords.
    pub fn matches(professional: &Professional, category: &Category) -> bool {
        let keywords: Vec<String> = category
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return false;
        }

        let metier_match = professional
            .metiers
            .iter()
            .any(|m| Self::contains_any(&m.name, &keywords));
        if metier_match {
            return true;
        }

        professional
            .specialty
            .as_deref()
            .is_some_and(|s| Self::contains_any(s, &keywords))
    }

    /// Resolves the filter against the registry. `All` matches everyone, an
    /// unknown slug matches no one.
    pub fn matches_filter(
        professional: &Professional,
        registry: &CategoryRegistry,
        filter: &CategoryFilter,
    ) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Slug(slug) => registry
                .get(slug)
                .is_some_and(|category| Self::matches(professional, category)),
        }
    }

    /// Every category the professional belongs to, in registry order.
    pub fn matching_slugs<'r>(
        professional: &Professional,
        registry: &'r CategoryRegistry,
    ) -> Vec<&'r str> {
        registry
            .categories()
            .iter()
            .filter(|c| Self::matches(professional, c))
            .map(|c| c.slug.as_str())
            .collect()
    }

    /// Filters a slice of professionals, preserving order.
    pub fn filter_professionals(
        professionals: &[Professional],
        category: &Category,
    ) -> Vec<Professional> {
        professionals
            .par_iter()
            .filter(|p| Self::matches(p, category))
            .cloned()
            .collect()
    }

    fn contains_any(field: &str, keywords: &[String]) -> bool {
        let haystack = field.to_lowercase();
        keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}
