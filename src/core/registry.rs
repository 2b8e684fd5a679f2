//! The fixed category tables of each directory page.
//!
//! Keywords are curated by hand; nothing here derives them from data.

use super::error::RegistryError;
use super::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The professional directories served by the "Art & Création" pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionType {
    Artisanat,
    Peinture,
    Sculpture,
    Photographie,
}

impl ProfessionType {
    pub const ALL: [ProfessionType; 4] = [
        ProfessionType::Artisanat,
        ProfessionType::Peinture,
        ProfessionType::Sculpture,
        ProfessionType::Photographie,
    ];

    /// The path segment used by the listing endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ProfessionType::Artisanat => "artisanat",
            ProfessionType::Peinture => "peinture",
            ProfessionType::Sculpture => "sculpture",
            ProfessionType::Photographie => "photographie",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfessionType::Artisanat => "Artisanat",
            ProfessionType::Peinture => "Peinture",
            ProfessionType::Sculpture => "Sculpture",
            ProfessionType::Photographie => "Photographie",
        }
    }
}

impl fmt::Display for ProfessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ProfessionType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProfessionType::ALL
            .into_iter()
            .find(|kind| kind.path_segment() == wanted)
            .ok_or_else(|| RegistryError::UnknownProfession(s.to_string()))
    }
}

/// (name, slug, keywords)
type CategoryDef = (&'static str, &'static str, &'static [&'static str]);

const ARTISANAT: &[CategoryDef] = &[
    (
        "Travail du bois",
        "bois",
        &["bois", "ébéniste", "menuisier", "marqueteur", "tourneur"],
    ),
    (
        "Céramique & Poterie",
        "ceramique",
        &["céramique", "ceramique", "poterie", "potier", "faïence", "porcelaine"],
    ),
    (
        "Textile & Couture",
        "textile",
        &["textile", "couture", "couturi", "tisserand", "broderie", "tapissier"],
    ),
    (
        "Métal & Forge",
        "metal",
        &["métal", "metal", "forgeron", "ferronnier", "dinandier"],
    ),
    (
        "Bijouterie",
        "bijoux",
        &["bijou", "joaillier", "orfèvre", "orfevre"],
    ),
    (
        "Cuir & Maroquinerie",
        "cuir",
        &["cuir", "maroquin", "sellier"],
    ),
    ("Verre & Vitrail", "verre", &["verre", "verrier", "vitrail"]),
];

const PEINTURE: &[CategoryDef] = &[
    ("Peinture à l'huile", "huile", &["huile"]),
    ("Aquarelle", "aquarelle", &["aquarelle"]),
    ("Acrylique", "acrylique", &["acrylique"]),
    ("Portrait", "portrait", &["portrait"]),
    (
        "Art abstrait",
        "abstrait",
        &["abstrait", "abstraction"],
    ),
    (
        "Art mural & Street art",
        "mural",
        &["mural", "fresque", "street art", "graffiti"],
    ),
];

const SCULPTURE: &[CategoryDef] = &[
    (
        "Pierre & Marbre",
        "pierre",
        &["pierre", "marbre", "granit"],
    ),
    ("Bois", "bois", &["bois", "ébéniste"]),
    (
        "Métal & Bronze",
        "metal",
        &["métal", "metal", "bronze", "fonderie", "acier"],
    ),
    (
        "Modelage & Argile",
        "argile",
        &["argile", "terre cuite", "modelage", "céramique"],
    ),
    (
        "Sculpture contemporaine",
        "contemporaine",
        &["contemporain", "installation", "résine", "resine"],
    ),
];

const PHOTOGRAPHIE: &[CategoryDef] = &[
    ("Portrait", "portrait", &["portrait"]),
    (
        "Mariage & Événements",
        "mariage",
        &["mariage", "événement", "evenement", "cérémonie"],
    ),
    (
        "Nature & Paysage",
        "nature",
        &["nature", "paysage", "animalier"],
    ),
    ("Mode & Beauté", "mode", &["mode", "beauté", "fashion"]),
    (
        "Architecture & Immobilier",
        "architecture",
        &["architecture", "immobilier", "intérieur"],
    ),
    (
        "Produit & Publicité",
        "produit",
        &["produit", "publicité", "packshot"],
    ),
];

/// A validated, read-only set of categories with lookup by slug.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    by_slug: HashMap<String, usize>,
}

impl CategoryRegistry {
    /// Builds a registry from custom definitions.
    ///
    /// Keywords are trimmed and lowercased; blank keywords are dropped before
    /// the non-empty check.
    pub fn new(categories: Vec<Category>) -> Result<Self, RegistryError> {
        let mut normalized = Vec::with_capacity(categories.len());
        let mut by_slug = HashMap::new();

        for mut category in categories {
            category.keywords = category
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();

            if category.keywords.is_empty() {
                return Err(RegistryError::EmptyKeywords(category.slug));
            }
            if by_slug.contains_key(&category.slug) {
                return Err(RegistryError::DuplicateSlug(category.slug));
            }
            by_slug.insert(category.slug.clone(), normalized.len());
            normalized.push(category);
        }

        Ok(Self {
            categories: normalized,
            by_slug,
        })
    }

    /// The built-in table for one directory page.
    pub fn for_profession(kind: ProfessionType) -> Self {
        let defs = match kind {
            ProfessionType::Artisanat => ARTISANAT,
            ProfessionType::Peinture => PEINTURE,
            ProfessionType::Sculpture => SCULPTURE,
            ProfessionType::Photographie => PHOTOGRAPHIE,
        };
        Self::from_defs(defs)
    }

    fn from_defs(defs: &[CategoryDef]) -> Self {
        let categories: Vec<Category> = defs
            .iter()
            .enumerate()
            .map(|(i, (name, slug, keywords))| Category {
                id: i as u32 + 1,
                name: name.to_string(),
                slug: slug.to_string(),
                keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        let by_slug = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.slug.clone(), i))
            .collect();
        Self {
            categories,
            by_slug,
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).map(|&i| &self.categories[i])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.slug.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
