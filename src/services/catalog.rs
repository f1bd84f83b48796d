use crate::models::MentorProfile;
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while obtaining the mentor catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("directory returned error: {0}")]
    Api(String),

    #[error("invalid directory response: {0}")]
    InvalidResponse(String),
}

/// Catalog provider, injected into the HTTP layer
///
/// The engine never queries a store itself; it takes whatever mentor list
/// the provider hands it. Swapping the file roster for the live directory
/// must not change ranking behavior.
pub enum MentorCatalog {
    File(FileCatalog),
    Directory(DirectoryClient),
}

impl MentorCatalog {
    pub async fn mentors(&self) -> Result<Vec<MentorProfile>, CatalogError> {
        match self {
            Self::File(catalog) => Ok(catalog.mentors()),
            Self::Directory(client) => client.mentors().await,
        }
    }
}

/// In-memory roster loaded once from a JSON file
///
/// Accepts either a bare array of profiles or an object with a `mentors`
/// array, so the same file works as a directory-response fixture.
pub struct FileCatalog {
    mentors: Vec<MentorProfile>,
}

impl FileCatalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let mentors = parse_roster(&raw)?;

        tracing::info!(
            "Loaded {} mentors from roster {}",
            mentors.len(),
            path.as_ref().display()
        );

        Ok(Self { mentors })
    }

    pub fn from_mentors(mentors: Vec<MentorProfile>) -> Self {
        Self { mentors }
    }

    pub fn mentors(&self) -> Vec<MentorProfile> {
        self.mentors.clone()
    }

    pub fn len(&self) -> usize {
        self.mentors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty()
    }
}

fn parse_roster(raw: &str) -> Result<Vec<MentorProfile>, CatalogError> {
    let json: Value = serde_json::from_str(raw)?;

    let entries = match &json {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(_) => json
            .get("mentors")
            .and_then(|m| m.as_array())
            .map(|v| v.as_slice())
            .ok_or_else(|| {
                CatalogError::InvalidResponse("missing mentors array".to_string())
            })?,
        _ => {
            return Err(CatalogError::InvalidResponse(
                "roster must be an array or an object with a mentors array".to_string(),
            ))
        }
    };

    // Tolerate individually broken entries; the ranker re-checks structure
    let mentors: Vec<MentorProfile> = entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(mentor) => Some(mentor),
            Err(e) => {
                tracing::warn!("Skipping unparseable roster entry: {}", e);
                None
            }
        })
        .collect();

    Ok(mentors)
}

/// HTTP client for the live mentor directory
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DirectoryClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch the full mentor roster from the directory
    pub async fn mentors(&self) -> Result<Vec<MentorProfile>, CatalogError> {
        let url = format!("{}/mentors", self.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching mentor roster from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Directory-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Api(format!(
                "Failed to fetch mentors: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let mentors = parse_roster(&body)?;

        tracing::debug!("Directory returned {} mentors", mentors.len());

        Ok(mentors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"{
        "mentors": [
            {
                "mentorId": "m1",
                "name": "Priya",
                "title": "Engineering Director",
                "story": "From finance to engineering leadership.",
                "specialties": ["Career Growth"],
                "chaisShared": 47,
                "growthStage": "senior",
                "communicationStyle": "storyteller"
            },
            {
                "mentorId": "m2",
                "name": "Bare entry with no specialties still parses",
                "specialties": []
            }
        ]
    }"#;

    #[test]
    fn test_parse_roster_object_form() {
        let mentors = parse_roster(ROSTER).unwrap();

        assert_eq!(mentors.len(), 2);
        assert_eq!(mentors[0].id, "m1");
        assert_eq!(mentors[0].chais_shared, 47);
        // Structural checks are the ranker's job; parsing stays permissive
        assert!(mentors[1].specialties.is_empty());
    }

    #[test]
    fn test_parse_roster_array_form() {
        let mentors = parse_roster(r#"[{"mentorId": "a", "name": "A"}]"#).unwrap();

        assert_eq!(mentors.len(), 1);
        assert_eq!(mentors[0].id, "a");
        assert!(mentors[0].specialties.is_empty());
    }

    #[test]
    fn test_parse_roster_rejects_scalar() {
        assert!(parse_roster("42").is_err());
    }

    #[test]
    fn test_file_catalog_load() {
        let path = std::env::temp_dir().join("chai_match_roster_test.json");
        std::fs::write(&path, ROSTER).unwrap();

        let catalog = FileCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_catalog_missing_file() {
        let result = FileCatalog::load("/nonexistent/roster.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_catalog_enum_dispatch() {
        let catalog = MentorCatalog::File(FileCatalog::from_mentors(vec![]));
        let mentors = tokio_test::block_on(catalog.mentors()).unwrap();
        assert!(mentors.is_empty());
    }

    #[test]
    fn test_directory_client_creation() {
        let client = DirectoryClient::new(
            "https://directory.test/v1/".to_string(),
            "test_key".to_string(),
        );

        assert_eq!(client.base_url, "https://directory.test/v1/");
        assert_eq!(client.api_key, "test_key");
    }
}
