//! Hosted backend speaking the PostgREST / GoTrue HTTP dialect.
//!
//! Row-level access control is enforced server side; the client only forwards the
//! project key and the user's access token.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{BackendError, MoodBackend, Result};
use crate::mood::calendar::date_key;
use crate::mood::{MoodEntry, SaveMoodRequest};
use crate::profile::UserProfile;

const MOODS_TABLE: &str = "moods";
const UPSERT_CONFLICT_COLUMNS: &str = "user_id,date";

#[derive(Debug, Clone)]
pub struct RestCredentials {
    /// Public project key, sent as `apikey`
    pub api_key: String,
    /// User access token; `None` means signed out
    pub access_token: Option<String>,
}

pub struct RestBackend {
    client: Client,
    base_url: String,
    credentials: RestCredentials,
}

/// User object as returned by the auth service
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

impl From<AuthUser> for UserProfile {
    fn from(user: AuthUser) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            full_name: user.user_metadata.full_name,
        }
    }
}

impl RestBackend {
    pub fn new(base_url: String, credentials: RestCredentials) -> Result<Self> {
        let base_url = normalize_base_url(&base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, MOODS_TABLE)
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .credentials
            .access_token
            .as_deref()
            .ok_or(BackendError::NotSignedIn)?;
        Ok(request
            .header("apikey", &self.credentials.api_key)
            .bearer_auth(token))
    }

    fn select(&self, query: &[(&str, String)]) -> Result<Vec<MoodEntry>> {
        log::debug!("GET {} {:?}", self.table_url(), query);
        let request = self.authorize(self.client.get(self.table_url()).query(query))?;
        let response = check_status(request.send()?)?;
        Ok(response.json()?)
    }
}

impl MoodBackend for RestBackend {
    fn current_user(&self) -> Result<Option<UserProfile>> {
        if self.credentials.access_token.is_none() {
            return Ok(None);
        }

        let request = self.authorize(self.client.get(self.user_url()))?;
        match check_status(request.send()?) {
            Ok(response) => {
                let user: AuthUser = response.json()?;
                Ok(Some(user.into()))
            }
            Err(BackendError::AuthFailed) => {
                log::warn!("Access token rejected; treating as signed out");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn fetch_range(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        self.select(&range_query(user_id, start, end))
    }

    fn fetch_day(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<MoodEntry>> {
        let rows = self.select(&day_query(user_id, date))?;
        Ok(rows.into_iter().next())
    }

    fn upsert(&self, user_id: Uuid, request: &SaveMoodRequest) -> Result<MoodEntry> {
        log::debug!("POST {} for {}", self.table_url(), request.date);
        let http = self
            .client
            .post(self.table_url())
            .query(&[("on_conflict", UPSERT_CONFLICT_COLUMNS)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&upsert_row(user_id, request));
        let response = check_status(self.authorize(http)?.send()?)?;

        let rows: Vec<MoodEntry> = response.json()?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("upsert returned no rows".to_string()))
    }

    fn update_profile(&self, full_name: &str) -> Result<UserProfile> {
        let http = self
            .client
            .put(self.user_url())
            .json(&json!({ "data": { "full_name": full_name.trim() } }));
        let response = check_status(self.authorize(http)?.send()?)?;
        let user: AuthUser = response.json()?;
        Ok(user.into())
    }
}

fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(BackendError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }
    Ok(url.to_string())
}

fn check_status(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::AuthFailed),
        status if !status.is_success() => Err(BackendError::Server {
            status: status.as_u16(),
            message: response.text().unwrap_or_default(),
        }),
        _ => Ok(response),
    }
}

fn range_query(user_id: Uuid, start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("user_id", format!("eq.{}", user_id)),
        ("date", format!("gte.{}", date_key(start))),
        ("date", format!("lte.{}", date_key(end))),
        ("order", "date.asc".to_string()),
    ]
}

fn day_query(user_id: Uuid, date: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("user_id", format!("eq.{}", user_id)),
        ("date", format!("eq.{}", date_key(date))),
        ("limit", "1".to_string()),
    ]
}

/// Row body for an upsert. Text columns are only sent when the request sets them, so a
/// merge leaves the stored values alone otherwise.
fn upsert_row(user_id: Uuid, request: &SaveMoodRequest) -> serde_json::Value {
    let mut row = json!({
        "user_id": user_id,
        "date": date_key(request.date),
        "mood": request.mood,
    });
    for (column, text) in [("note", &request.note), ("positive_note", &request.positive_note)] {
        if let Some(text) = text.as_deref() {
            row[column] = if text.is_empty() {
                serde_json::Value::Null
            } else {
                json!(text)
            };
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodGrade;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn credentials(token: Option<&str>) -> RestCredentials {
        RestCredentials {
            api_key: "anon-key".to_string(),
            access_token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_base_url_validation() {
        assert_eq!(
            normalize_base_url(" https://project.example.co/ ").unwrap(),
            "https://project.example.co"
        );
        assert!(matches!(
            normalize_base_url("project.example.co"),
            Err(BackendError::InvalidUrl(_))
        ));
        assert!(RestBackend::new("ftp://x".to_string(), credentials(None)).is_err());
    }

    #[test]
    fn test_endpoints() {
        let backend =
            RestBackend::new("https://project.example.co/".to_string(), credentials(None)).unwrap();
        assert_eq!(backend.table_url(), "https://project.example.co/rest/v1/moods");
        assert_eq!(backend.user_url(), "https://project.example.co/auth/v1/user");
    }

    #[test]
    fn test_signed_out_without_token() {
        let backend =
            RestBackend::new("https://project.example.co".to_string(), credentials(None)).unwrap();
        assert_eq!(backend.current_user().unwrap(), None);
        assert!(matches!(
            backend.fetch_day(Uuid::nil(), date("2026-01-01")),
            Err(BackendError::NotSignedIn)
        ));
    }

    #[test]
    fn test_range_query_filters_year() {
        let user = Uuid::nil();
        let query = range_query(user, date("2026-01-01"), date("2026-12-31"));

        assert!(query.contains(&("user_id", format!("eq.{}", user))));
        assert!(query.contains(&("date", "gte.2026-01-01".to_string())));
        assert!(query.contains(&("date", "lte.2026-12-31".to_string())));
    }

    #[test]
    fn test_day_query() {
        let query = day_query(Uuid::nil(), date("2026-02-14"));
        assert!(query.contains(&("date", "eq.2026-02-14".to_string())));
        assert!(query.contains(&("limit", "1".to_string())));
    }

    #[test]
    fn test_upsert_row_leaves_positive_note_unless_set() {
        let mut request = SaveMoodRequest::new(date("2026-02-14"), MoodGrade::B);
        request.note = Some(String::new());

        let row = upsert_row(Uuid::nil(), &request);
        assert_eq!(row["date"], "2026-02-14");
        assert_eq!(row["mood"], "B");
        assert!(row["note"].is_null());
        assert!(row.get("positive_note").is_none());

        request.positive_note = Some(String::new());
        assert!(upsert_row(Uuid::nil(), &request)["positive_note"].is_null());

        request.positive_note = Some("sunset".to_string());
        assert_eq!(upsert_row(Uuid::nil(), &request)["positive_note"], "sunset");
    }

    #[test]
    fn test_upsert_row_omits_note_for_grade_only_save() {
        let request = SaveMoodRequest::new(date("2026-02-14"), MoodGrade::D);

        let row = upsert_row(Uuid::nil(), &request);
        assert_eq!(row["mood"], "D");
        assert!(row.get("note").is_none());
        assert!(row.get("positive_note").is_none());
    }

    #[test]
    fn test_auth_user_to_profile() {
        let json = r#"{
            "id": "0b6c1a1e-6c2e-4cf2-8a0b-3b7f0d1c9e11",
            "email": "sam@example.com",
            "aud": "authenticated",
            "user_metadata": { "full_name": "Sam Rivera", "avatar_url": null }
        }"#;
        let user: AuthUser = serde_json::from_str(json).unwrap();
        let profile: UserProfile = user.into();
        assert_eq!(profile.display_name(), "Sam Rivera");

        let bare: AuthUser =
            serde_json::from_str(r#"{"id": "0b6c1a1e-6c2e-4cf2-8a0b-3b7f0d1c9e11"}"#).unwrap();
        assert_eq!(UserProfile::from(bare).full_name, None);
    }
}
