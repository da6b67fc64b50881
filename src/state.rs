//! Shared client state / Estado compartilhado
//!
//! Single source of truth for all domain and selection data. Each cell is
//! an independently locked value; a write is visible to the next read,
//! last-writer-wins. All mutation goes through the methods below rather
//! than ad hoc access to the cells.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::models::{City, Course, CourseOffering, Institution, Photo};
use crate::search::SearchResult;

#[derive(Default)]
pub struct AppState {
    // Domain lists. Institutions and cities are loaded once at startup;
    // courses, offerings and photos are appended on demand.
    institutions: RwLock<Vec<Institution>>,
    cities: RwLock<Vec<City>>,
    courses: RwLock<Vec<Course>>,
    course_offerings: RwLock<Vec<CourseOffering>>,
    photos: RwLock<Vec<Photo>>,

    // Marker sets. `fetched_*` holds institution ids whose fetch completed;
    // `pending_*` holds ids with a request currently in flight. The pending
    // id is set synchronously before the request is issued, so a rapid
    // reselection cannot start a second request for the same institution.
    fetched_courses_data: RwLock<HashSet<i64>>,
    pending_courses_data: RwLock<HashSet<i64>>,
    fetched_photos: RwLock<HashSet<i64>>,
    pending_photos: RwLock<HashSet<i64>>,

    // Selection and panel cells
    selected_institution: RwLock<Option<Institution>>,
    selected_course: RwLock<Option<Course>>,
    institution_info_open: RwLock<bool>,

    // Live search results, rewritten on every query
    search_results: RwLock<Vec<SearchResult>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- startup loads / carga inicial ----

    pub fn load_institutions(&self, institutions: Vec<Institution>) {
        *self.institutions.write() = institutions;
    }

    pub fn load_cities(&self, cities: Vec<City>) {
        *self.cities.write() = cities;
    }

    pub fn institutions(&self) -> Vec<Institution> {
        self.institutions.read().clone()
    }

    pub fn cities(&self) -> Vec<City> {
        self.cities.read().clone()
    }

    // ---- incremental appends ----

    pub fn add_courses(&self, courses: Vec<Course>) {
        self.courses.write().extend(courses);
    }

    pub fn add_course_offerings(&self, offerings: Vec<CourseOffering>) {
        self.course_offerings.write().extend(offerings);
    }

    pub fn add_photos(&self, photos: Vec<Photo>) {
        self.photos.write().extend(photos);
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.photos.read().clone()
    }

    // ---- marker sets ----

    /// Try to start a courses-data fetch for an institution. Returns false
    /// when the fetch already completed or is currently in flight.
    pub fn begin_courses_fetch(&self, institution_id: i64) -> bool {
        if self.fetched_courses_data.read().contains(&institution_id) {
            return false;
        }
        self.pending_courses_data.write().insert(institution_id)
    }

    /// Settle a courses-data fetch. On success the id moves to the
    /// completed set; on failure only the pending marker is cleared so a
    /// later selection retries.
    pub fn finish_courses_fetch(&self, institution_id: i64, ok: bool) {
        self.pending_courses_data.write().remove(&institution_id);
        if ok {
            self.fetched_courses_data.write().insert(institution_id);
        }
    }

    pub fn has_courses_data(&self, institution_id: i64) -> bool {
        self.fetched_courses_data.read().contains(&institution_id)
    }

    /// Same protocol as [`begin_courses_fetch`](Self::begin_courses_fetch),
    /// for the photo fetch.
    pub fn begin_photos_fetch(&self, institution_id: i64) -> bool {
        if self.fetched_photos.read().contains(&institution_id) {
            return false;
        }
        self.pending_photos.write().insert(institution_id)
    }

    pub fn finish_photos_fetch(&self, institution_id: i64, ok: bool) {
        self.pending_photos.write().remove(&institution_id);
        if ok {
            self.fetched_photos.write().insert(institution_id);
        }
    }

    pub fn has_photos(&self, institution_id: i64) -> bool {
        self.fetched_photos.read().contains(&institution_id)
    }

    // ---- selection / panels ----

    pub fn select_institution_by_id(&self, institution_id: i64) -> Option<Institution> {
        let institution = self
            .institutions
            .read()
            .iter()
            .find(|i| i.id == institution_id)
            .cloned();
        *self.selected_institution.write() = institution.clone();
        institution
    }

    pub fn selected_institution(&self) -> Option<Institution> {
        self.selected_institution.read().clone()
    }

    pub fn select_course(&self, course: Option<Course>) {
        *self.selected_course.write() = course;
    }

    pub fn selected_course(&self) -> Option<Course> {
        self.selected_course.read().clone()
    }

    pub fn open_institution_info(&self) {
        *self.institution_info_open.write() = true;
    }

    pub fn close_institution_info(&self) {
        *self.institution_info_open.write() = false;
    }

    pub fn is_institution_info_open(&self) -> bool {
        *self.institution_info_open.read()
    }

    // ---- search results cell ----

    pub fn set_search_results(&self, results: Vec<SearchResult>) {
        *self.search_results.write() = results;
    }

    pub fn search_results(&self) -> Vec<SearchResult> {
        self.search_results.read().clone()
    }

    // ---- derived lookups / consultas derivadas ----

    pub fn institution_city(&self, institution: &Institution) -> Option<City> {
        self.cities
            .read()
            .iter()
            .find(|c| c.id == institution.city_id)
            .cloned()
    }

    pub fn city_institutions(&self, city: &City) -> Vec<Institution> {
        self.institutions
            .read()
            .iter()
            .filter(|i| i.city_id == city.id)
            .cloned()
            .collect()
    }

    pub fn institution_photos(&self, institution_id: i64) -> Vec<Photo> {
        self.photos
            .read()
            .iter()
            .filter(|p| p.institution_id == institution_id)
            .cloned()
            .collect()
    }

    pub fn institution_first_photo(&self, institution_id: i64) -> Option<Photo> {
        self.photos
            .read()
            .iter()
            .find(|p| p.institution_id == institution_id)
            .cloned()
    }

    pub fn institution_courses(&self, institution_id: i64) -> Vec<Course> {
        self.courses
            .read()
            .iter()
            .filter(|c| c.institution_id == institution_id)
            .cloned()
            .collect()
    }

    pub fn course_offerings_of(&self, course_id: i64) -> Vec<CourseOffering> {
        self.course_offerings
            .read()
            .iter()
            .filter(|o| o.course_id == course_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institution(id: i64, name: &str, city_id: i64) -> Institution {
        Institution {
            id,
            name: name.to_string(),
            address: format!("Rua {}, 100", name),
            phone_number: "(13) 3333-0000".to_string(),
            description: vec![],
            city_id,
        }
    }

    fn seeded_state() -> AppState {
        let state = AppState::new();
        state.load_cities(vec![
            City {
                id: 10,
                name: "Praia Grande".to_string(),
            },
            City {
                id: 11,
                name: "Santos".to_string(),
            },
        ]);
        state.load_institutions(vec![
            institution(1, "Fatec Praia Grande", 10),
            institution(2, "Fatec Baixada Santista", 11),
        ]);
        state
    }

    #[test]
    fn begin_fetch_blocks_completed_and_pending_ids() {
        let state = AppState::new();

        assert!(state.begin_courses_fetch(1));
        // In flight: a second begin must not start another request
        assert!(!state.begin_courses_fetch(1));

        state.finish_courses_fetch(1, true);
        assert!(state.has_courses_data(1));
        assert!(!state.begin_courses_fetch(1));
    }

    #[test]
    fn failed_fetch_leaves_id_retryable() {
        let state = AppState::new();

        assert!(state.begin_courses_fetch(7));
        state.finish_courses_fetch(7, false);

        assert!(!state.has_courses_data(7));
        assert!(state.begin_courses_fetch(7));
    }

    #[test]
    fn photo_markers_follow_the_same_protocol() {
        let state = AppState::new();

        assert!(state.begin_photos_fetch(3));
        assert!(!state.begin_photos_fetch(3));
        state.finish_photos_fetch(3, true);
        assert!(state.has_photos(3));
        assert!(!state.begin_photos_fetch(3));
    }

    #[test]
    fn derived_lookups_resolve_relations() {
        let state = seeded_state();

        let fatec_pg = state.select_institution_by_id(1).unwrap();
        assert_eq!(
            state.institution_city(&fatec_pg).map(|c| c.name),
            Some("Praia Grande".to_string())
        );

        let santos = City {
            id: 11,
            name: "Santos".to_string(),
        };
        let members = state.city_institutions(&santos);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, 2);

        state.add_photos(vec![
            Photo {
                id: 100,
                institution_id: 1,
                url: "https://cdn.example/pg-front.jpg".to_string(),
            },
            Photo {
                id: 101,
                institution_id: 1,
                url: "https://cdn.example/pg-lab.jpg".to_string(),
            },
        ]);
        assert_eq!(
            state.institution_first_photo(1).map(|p| p.id),
            Some(100)
        );
        assert_eq!(state.institution_photos(1).len(), 2);
        assert!(state.institution_first_photo(2).is_none());
    }

    #[test]
    fn selection_and_panel_cells() {
        let state = seeded_state();

        assert!(state.select_institution_by_id(999).is_none());
        assert!(state.selected_institution().is_none());

        state.select_institution_by_id(2);
        assert_eq!(state.selected_institution().map(|i| i.id), Some(2));

        assert!(!state.is_institution_info_open());
        state.open_institution_info();
        assert!(state.is_institution_info_open());
        state.close_institution_info();
        assert!(!state.is_institution_info_open());
    }

    #[test]
    fn appends_accumulate_and_filter_by_owner() {
        let state = seeded_state();

        state.add_courses(vec![
            Course {
                id: 1,
                title: "Análise e Desenvolvimento de Sistemas".to_string(),
                institution_id: 1,
            },
            Course {
                id: 2,
                title: "Gestão Empresarial".to_string(),
                institution_id: 2,
            },
        ]);
        state.add_course_offerings(vec![CourseOffering {
            id: 1,
            course_id: 1,
            shift: "Noturno".to_string(),
            period: None,
        }]);

        assert_eq!(state.institution_courses(1).len(), 1);
        assert_eq!(state.institution_courses(2).len(), 1);
        assert_eq!(state.course_offerings_of(1).len(), 1);
        assert!(state.course_offerings_of(2).is_empty());
    }
}
