//! Per-category counts over a professional list.
//!
//! Everything is recomputed from scratch on each call; directory lists are small
//! enough that no incremental index is kept.

use super::matcher::CategoryMatcher;
use super::registry::CategoryRegistry;
use super::{CategoryFilter, Professional};
use rayon::prelude::*;
use serde::Serialize;

/// What the rendering layer needs to draw one category tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTile {
    pub slug: String,
    pub name: String,
    pub count: usize,
}

/// `All` counts the whole list, a known slug counts its matches, an unknown slug is 0.
pub fn count_by_category(
    list: &[Professional],
    registry: &CategoryRegistry,
    filter: &CategoryFilter,
) -> usize {
    match filter {
        CategoryFilter::All => list.len(),
        CategoryFilter::Slug(slug) => match registry.get(slug) {
            Some(category) => list
                .iter()
                .filter(|p| CategoryMatcher::matches(p, category))
                .count(),
            None => 0,
        },
    }
}

/// The subset of `list` selected by `filter`, in list order.
pub fn filter_by_category(
    list: &[Professional],
    registry: &CategoryRegistry,
    filter: &CategoryFilter,
) -> Vec<Professional> {
    match filter {
        CategoryFilter::All => list.to_vec(),
        CategoryFilter::Slug(slug) => match registry.get(slug) {
            Some(category) => CategoryMatcher::filter_professionals(list, category),
            None => {
                tracing::warn!("Unknown category slug '{}', nothing to show", slug);
                Vec::new()
            }
        },
    }
}

/// One tile per registry category, in registry order.
pub fn category_tiles(list: &[Professional], registry: &CategoryRegistry) -> Vec<CategoryTile> {
    registry
        .categories()
        .par_iter()
        .map(|category| CategoryTile {
            slug: category.slug.clone(),
            name: category.name.clone(),
            count: list
                .iter()
                .filter(|p| CategoryMatcher::matches(p, category))
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::ProfessionType;
    use crate::core::Category;
    use proptest::prelude::*;

    fn bois_registry() -> CategoryRegistry {
        CategoryRegistry::new(vec![
            Category {
                id: 1,
                name: "Bois".to_string(),
                slug: "bois".to_string(),
                keywords: vec!["bois".to_string(), "ébéniste".to_string()],
            },
            Category {
                id: 2,
                name: "Pierre".to_string(),
                slug: "pierre".to_string(),
                keywords: vec!["pierre".to_string()],
            },
        ])
        .unwrap()
    }

    fn scenario_list() -> Vec<Professional> {
        vec![
            Professional::new("1", "Jean Bois").with_metier("1", "Ébéniste"),
            Professional::new("2", "Marc Pierre").with_metier("2", "Tailleur de pierre"),
        ]
    }

    #[test]
    fn test_scenario_bois_counts_and_filters_one() {
        let registry = bois_registry();
        let list = scenario_list();
        let bois = CategoryFilter::from("bois");

        assert_eq!(count_by_category(&list, &registry, &bois), 1);
        let filtered = filter_by_category(&list, &registry, &bois);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Jean Bois");
    }

    #[test]
    fn test_unknown_slug_counts_zero() {
        let registry = bois_registry();
        let list = scenario_list();
        let unknown = CategoryFilter::from("verre");
        assert_eq!(count_by_category(&list, &registry, &unknown), 0);
        assert!(filter_by_category(&list, &registry, &unknown).is_empty());
    }

    #[test]
    fn test_all_on_empty_list_is_zero() {
        let registry = bois_registry();
        assert_eq!(count_by_category(&[], &registry, &CategoryFilter::All), 0);
    }

    #[test]
    fn test_tiles_follow_registry_order() {
        let registry = bois_registry();
        let tiles = category_tiles(&scenario_list(), &registry);
        assert_eq!(
            tiles,
            vec![
                CategoryTile {
                    slug: "bois".to_string(),
                    name: "Bois".to_string(),
                    count: 1
                },
                CategoryTile {
                    slug: "pierre".to_string(),
                    name: "Pierre".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_tile_counts_may_exceed_list_length() {
        let registry = CategoryRegistry::for_profession(ProfessionType::Sculpture);
        let list = vec![Professional::new("1", "Léa").with_specialty("Bois, pierre et bronze")];
        let total: usize = category_tiles(&list, &registry).iter().map(|t| t.count).sum();
        assert!(total > list.len());
    }

    fn arb_professional() -> impl Strategy<Value = Professional> {
        (
            "[0-9]{1,6}",
            "[A-Za-z ]{0,12}",
            proptest::option::of("[a-zé ]{0,20}"),
            proptest::collection::vec("[a-zé ]{0,16}", 0..3),
        )
            .prop_map(|(id, name, specialty, metiers)| {
                let mut p = Professional::new(id, name);
                p.specialty = specialty;
                for (i, m) in metiers.into_iter().enumerate() {
                    p = p.with_metier(i.to_string(), m);
                }
                p
            })
    }

    proptest! {
        #[test]
        fn prop_all_is_identity(list in proptest::collection::vec(arb_professional(), 0..40)) {
            let registry = CategoryRegistry::for_profession(ProfessionType::Artisanat);
            prop_assert_eq!(count_by_category(&list, &registry, &CategoryFilter::All), list.len());
            prop_assert_eq!(filter_by_category(&list, &registry, &CategoryFilter::All), list);
        }

        #[test]
        fn prop_count_agrees_with_filter(
            list in proptest::collection::vec(arb_professional(), 0..40)
        ) {
            let registry = CategoryRegistry::for_profession(ProfessionType::Artisanat);
            for slug in registry.slugs() {
                let filter = CategoryFilter::from(slug);
                prop_assert_eq!(
                    count_by_category(&list, &registry, &filter),
                    filter_by_category(&list, &registry, &filter).len()
                );
            }
        }
    }
}
