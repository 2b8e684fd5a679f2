//! Turns the loosely-typed records of the listing endpoints into `Professional`s.
//!
//! Every endpoint spells its fields a little differently. This is the single place
//! where those variants are resolved; each field documents its fallback chain.
//! A missing or mistyped field yields `None`/empty, never an error.

use super::{Metier, Professional};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Normalizes a whole `data` array.
///
/// Non-object entries are skipped. Ids are made unique by dropping later
/// duplicates, so the first occurrence wins.
pub fn normalize_professionals(records: &[Value]) -> Vec<Professional> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(obj) = record.as_object() else {
            tracing::warn!("Skipping non-object professional record at index {}", index);
            continue;
        };
        let professional = normalize_professional(obj, index);
        if !seen.insert(professional.id.clone()) {
            tracing::warn!(
                "Duplicate professional id '{}' at index {}, keeping the first one",
                professional.id,
                index
            );
            continue;
        }
        result.push(professional);
    }

    result
}

/// Normalizes one record. `index` is only used to synthesize a missing id.
pub fn normalize_professional(obj: &Map<String, Value>, index: usize) -> Professional {
    Professional {
        // id | _id | userId, string or number; otherwise "anon-{index}"
        id: first_id(obj, &["id", "_id", "userId", "user_id"])
            .unwrap_or_else(|| format!("anon-{index}")),
        // name | firstName + lastName | companyName; otherwise ""
        name: display_name(obj),
        // specialty | category | profession
        specialty: first_str(obj, &["specialty", "specialite", "category", "profession"]),
        // city | location | address.city
        city: first_str(obj, &["city", "ville", "location"]).or_else(|| {
            obj.get("address")
                .and_then(Value::as_object)
                .and_then(|a| first_str(a, &["city", "ville"]))
        }),
        // avatar | avatarUrl | image | photo
        avatar: first_str(obj, &["avatar", "avatarUrl", "avatar_url", "image", "photo"]),
        // metiers: [{id, name|libelle}] or ["name"]
        metiers: metiers(obj),
        // bio | description
        bio: first_str(obj, &["bio", "description"]),
        // verified | isVerified, bool or "true"/"false"
        verified: first_bool(obj, &["verified", "isVerified", "is_verified"]),
        // rating | averageRating, number or numeric string
        rating: first_f64(obj, &["rating", "averageRating", "average_rating"]),
        // reviewCount | reviewsCount | review_count
        review_count: first_f64(obj, &["reviewCount", "reviewsCount", "review_count"])
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32),
    }
}

fn display_name(obj: &Map<String, Value>) -> String {
    if let Some(name) = first_str(obj, &["name", "nom"]) {
        return name;
    }
    let first = first_str(obj, &["firstName", "first_name", "prenom"]);
    let last = first_str(obj, &["lastName", "last_name"]);
    let joined = [first, last].into_iter().flatten().collect::<Vec<_>>().join(" ");
    if !joined.is_empty() {
        return joined;
    }
    first_str(obj, &["companyName", "company_name"]).unwrap_or_default()
}

fn metiers(obj: &Map<String, Value>) -> Vec<Metier> {
    let Some(items) = obj.get("metiers").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::String(name) if !name.trim().is_empty() => Some(Metier {
                id: i.to_string(),
                name: name.trim().to_string(),
            }),
            Value::Object(m) => {
                let name = first_str(m, &["name", "libelle", "label"])?;
                Some(Metier {
                    id: first_id(m, &["id", "_id"]).unwrap_or_else(|| i.to_string()),
                    name,
                })
            }
            _ => None,
        })
        .collect()
}

/// First non-blank string among `keys`, trimmed.
fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_id(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn first_bool(obj: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

fn first_f64(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_shape() {
        let records = vec![json!({
            "id": "p1",
            "name": "Jean Bois",
            "specialty": "Ébéniste",
            "city": "Lyon",
            "avatar": "/img/jean.png",
            "metiers": [{"id": 1, "name": "Ébéniste"}],
            "bio": "Meubles sur mesure",
            "verified": true,
            "rating": 4.5,
            "reviewCount": 12
        })];
        let p = &normalize_professionals(&records)[0];
        assert_eq!(p.id, "p1");
        assert_eq!(p.name, "Jean Bois");
        assert_eq!(p.specialty.as_deref(), Some("Ébéniste"));
        assert_eq!(p.city.as_deref(), Some("Lyon"));
        assert_eq!(
            p.metiers,
            vec![Metier {
                id: "1".to_string(),
                name: "Ébéniste".to_string()
            }]
        );
        assert_eq!(p.verified, Some(true));
        assert_eq!(p.rating, Some(4.5));
        assert_eq!(p.review_count, Some(12));
    }

    #[test]
    fn test_variant_field_names() {
        let records = vec![json!({
            "userId": 42,
            "firstName": "Marc",
            "lastName": "Pierre",
            "category": "Tailleur de pierre",
            "address": {"city": "Nantes"},
            "image": "marc.jpg",
            "metiers": ["Sculpteur", {"libelle": "Marbrier"}],
            "isVerified": "false",
            "averageRating": "3.8",
            "reviewsCount": 3
        })];
        let p = &normalize_professionals(&records)[0];
        assert_eq!(p.id, "42");
        assert_eq!(p.name, "Marc Pierre");
        assert_eq!(p.specialty.as_deref(), Some("Tailleur de pierre"));
        assert_eq!(p.city.as_deref(), Some("Nantes"));
        assert_eq!(p.avatar.as_deref(), Some("marc.jpg"));
        assert_eq!(p.metiers.len(), 2);
        assert_eq!(p.metiers[1].name, "Marbrier");
        assert_eq!(p.verified, Some(false));
        assert_eq!(p.rating, Some(3.8));
        assert_eq!(p.review_count, Some(3));
    }

    #[test]
    fn test_missing_fields_are_empty_not_errors() {
        let records = vec![json!({}), json!({"name": "  ", "companyName": "Atelier Verre"})];
        let list = normalize_professionals(&records);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "anon-0");
        assert_eq!(list[0].name, "");
        assert!(list[0].specialty.is_none());
        assert!(list[0].metiers.is_empty());
        assert_eq!(list[1].name, "Atelier Verre");
    }

    #[test]
    fn test_mistyped_fields_fall_back_to_none() {
        let records = vec![json!({
            "id": "x",
            "rating": {"avg": 5},
            "metiers": "Potier",
            "city": 75
        })];
        let p = &normalize_professionals(&records)[0];
        assert!(p.rating.is_none());
        assert!(p.metiers.is_empty());
        assert!(p.city.is_none());
    }

    #[test]
    fn test_non_objects_are_skipped_and_duplicates_dropped() {
        let records = vec![
            json!({"id": 1, "name": "Premier"}),
            json!("garbage"),
            json!({"id": "1", "name": "Doublon"}),
            json!(null),
        ];
        let list = normalize_professionals(&records);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Premier");
    }
}
