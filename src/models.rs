use serde::{Deserialize, Serialize};

/// A municipality grouping one or more campuses / Município
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

/// A single FATEC campus / Unidade
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    /// Presentation text, one entry per paragraph / Texto de apresentação
    pub description: Vec<String>,
    pub city_id: i64,
}

/// A program of study offered by an institution / Curso
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub institution_id: i64,
}

/// A scheduled instance of a course (shift/period) / Oferta de curso
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOffering {
    pub id: i64,
    pub course_id: i64,
    pub shift: String,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub institution_id: i64,
    pub url: String,
}

/// Wire envelope of `GET /institution-courses-data/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionCoursesData {
    pub courses: Vec<Course>,
    pub course_offerings: Vec<CourseOffering>,
}

/// Wire envelope of `GET /photos/institution/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosResponse {
    pub photos: Vec<Photo>,
}

/// Wire envelope of `GET /institutions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionsResponse {
    pub institutions: Vec<Institution>,
}

/// Wire envelope of `GET /cities`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<City>,
}
