//! Search index & matcher / Busca
//!
//! Fuzzy search over institutions and cities keyed by name, powered by
//! [`nucleo`]. The index is rebuilt on every query; there is no incremental
//! maintenance. A city hit expands into one result per institution of that
//! city, and the combined list is deduplicated by institution id.

use std::cell::RefCell;
use std::collections::HashSet;

use nucleo::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo::Matcher;
use serde::Serialize;

use crate::models::{City, Institution, Photo};

/// Projection of an institution for the result list. Never persisted,
/// rebuilt on every query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Either side of the combined index / Item do índice
enum Candidate<'a> {
    Institution(&'a Institution),
    City(&'a City),
}

impl AsRef<str> for Candidate<'_> {
    fn as_ref(&self) -> &str {
        match self {
            Candidate::Institution(i) => &i.name,
            Candidate::City(c) => &c.name,
        }
    }
}

thread_local! {
    static MATCHER: RefCell<Matcher> = RefCell::new(Matcher::default());
}

/// Run a query over the current institution and city lists.
///
/// Results come back in relevance order (score descending, ties in
/// discovery order), one entry per distinct institution id. An empty query
/// yields an empty list; nucleo itself would match every candidate.
pub fn match_results(
    query: &str,
    institutions: &[Institution],
    cities: &[City],
    photos: &[Photo],
) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let candidates: Vec<Candidate> = institutions
        .iter()
        .map(Candidate::Institution)
        .chain(cities.iter().map(Candidate::City))
        .collect();

    // Accent-tolerant, case-insensitive: "sao" matches "São"
    let atom = Atom::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );
    let matches =
        MATCHER.with(|matcher| atom.match_list(candidates, &mut matcher.borrow_mut()));

    let mut results = Vec::new();
    for (candidate, _score) in matches {
        match candidate {
            Candidate::Institution(institution) => {
                let city_name = cities
                    .iter()
                    .find(|c| c.id == institution.city_id)
                    .map(|c| c.name.clone());
                results.push(result_from_institution(institution, city_name, photos));
            }
            Candidate::City(city) => {
                for institution in institutions.iter().filter(|i| i.city_id == city.id) {
                    results.push(result_from_institution(
                        institution,
                        Some(city.name.clone()),
                        photos,
                    ));
                }
            }
        }
    }

    dedupe_by_id(results)
}

fn result_from_institution(
    institution: &Institution,
    city_name: Option<String>,
    photos: &[Photo],
) -> SearchResult {
    SearchResult {
        id: institution.id,
        name: institution.name.clone(),
        address: institution.address.clone(),
        city_name,
        photo_url: photos
            .iter()
            .find(|p| p.institution_id == institution.id)
            .map(|p| p.url.clone()),
    }
}

/// Keep one entry per institution id, first occurrence wins so relevance
/// order is preserved.
pub fn dedupe_by_id(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results.into_iter().filter(|r| seen.insert(r.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institution(id: i64, name: &str, city_id: i64) -> Institution {
        Institution {
            id,
            name: name.to_string(),
            address: format!("Av. {}, 1", name),
            phone_number: "(13) 3591-1303".to_string(),
            description: vec![],
            city_id,
        }
    }

    fn city(id: i64, name: &str) -> City {
        City {
            id,
            name: name.to_string(),
        }
    }

    fn photo(id: i64, institution_id: i64, url: &str) -> Photo {
        Photo {
            id,
            institution_id,
            url: url.to_string(),
        }
    }

    #[test]
    fn empty_query_yields_no_results() {
        let institutions = vec![institution(1, "Fatec Praia Grande", 10)];
        let cities = vec![city(10, "Praia Grande")];

        assert!(match_results("", &institutions, &cities, &[]).is_empty());
        assert!(match_results("   ", &institutions, &cities, &[]).is_empty());
    }

    #[test]
    fn unmatched_query_yields_no_results() {
        let institutions = vec![institution(1, "Fatec Praia Grande", 10)];
        let cities = vec![city(10, "Praia Grande")];

        assert!(match_results("xyzzy", &institutions, &cities, &[]).is_empty());
    }

    #[test]
    fn institution_and_covering_city_collapse_to_one_entry() {
        // "Praia" hits both the institution name and the city name; the
        // city expansion reproduces the same institution.
        let institutions = vec![institution(1, "Fatec Praia Grande", 10)];
        let cities = vec![city(10, "Praia Grande")];

        let results = match_results("Praia", &institutions, &cities, &[]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[0].name, "Fatec Praia Grande");
        assert_eq!(results[0].city_name.as_deref(), Some("Praia Grande"));
    }

    #[test]
    fn city_match_expands_to_every_member_institution() {
        let institutions = vec![
            institution(1, "Fatec Baixada Santista", 11),
            institution(2, "Fatec Rubens Lara", 11),
            institution(3, "Fatec Praia Grande", 10),
        ];
        let cities = vec![city(10, "Praia Grande"), city(11, "Santos")];

        let results = match_results("Santos", &institutions, &cities, &[]);

        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert!(ids.contains(&1));
        assert!(ids.contains(&2));
        for r in results.iter().filter(|r| r.id == 1 || r.id == 2) {
            assert_eq!(r.city_name.as_deref(), Some("Santos"));
        }
        assert!(!ids.contains(&3));
    }

    #[test]
    fn city_without_institutions_contributes_nothing() {
        let institutions = vec![institution(1, "Fatec Praia Grande", 10)];
        let cities = vec![city(10, "Praia Grande"), city(20, "Peruíbe")];

        let results = match_results("Peruíbe", &institutions, &cities, &[]);
        assert!(results.is_empty());
    }

    #[test]
    fn results_carry_first_photo_url() {
        let institutions = vec![institution(1, "Fatec Praia Grande", 10)];
        let cities = vec![city(10, "Praia Grande")];
        let photos = vec![
            photo(50, 1, "https://cdn.example/front.jpg"),
            photo(51, 1, "https://cdn.example/lab.jpg"),
        ];

        let results = match_results("Fatec", &institutions, &cities, &photos);

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].photo_url.as_deref(),
            Some("https://cdn.example/front.jpg")
        );
    }

    #[test]
    fn matching_is_accent_and_case_tolerant() {
        let institutions = vec![institution(1, "Fatec São Paulo", 30)];
        let cities = vec![city(30, "São Paulo")];

        let results = match_results("sao paulo", &institutions, &cities, &[]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let a = SearchResult {
            id: 1,
            name: "Fatec Praia Grande".to_string(),
            address: "a".to_string(),
            city_name: None,
            photo_url: None,
        };
        let mut b = a.clone();
        b.city_name = Some("Praia Grande".to_string());
        let c = SearchResult {
            id: 2,
            name: "Fatec Santos".to_string(),
            address: "b".to_string(),
            city_name: None,
            photo_url: None,
        };

        let deduped = dedupe_by_id(vec![a, b, c]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, 1);
        // First occurrence won, so the later cityName-bearing copy is gone
        assert!(deduped[0].city_name.is_none());
        assert_eq!(deduped[1].id, 2);
    }
}
