//! Client for the tasks HTTP API.
//!
//! The server is an external collaborator; this module only speaks its wire
//! format. Week bodies come back either wrapped as `{"days": {...}}` (the
//! stored document, extra fields ignored) or as a bare day map.

use crate::domain::{Task, Week, WeekKey};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("server answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote week storage, addressed by week key
pub trait TaskApi {
    /// GET the stored week
    fn fetch_week(&self, key: &WeekKey) -> ApiResult<Week>;

    /// POST the full week
    fn store_week(&self, key: &WeekKey, week: &Week) -> ApiResult<()>;

    /// DELETE the stored week
    fn delete_week(&self, key: &WeekKey) -> ApiResult<()>;

    /// PUT one task, addressed by day and position
    fn update_task(
        &self,
        key: &WeekKey,
        day: usize,
        task_id: usize,
        task: &Task,
    ) -> ApiResult<serde_json::Value>;

    /// DELETE one task, addressed by day and position
    fn delete_task(&self, key: &WeekKey, day: usize, task_id: usize) -> ApiResult<serde_json::Value>;
}

#[derive(Serialize)]
struct StoreWeekBody<'a> {
    days: &'a Week,
}

/// Decode a GET body; `null` and `{"days": null}` are empty weeks
pub fn parse_week_payload(body: &str) -> Result<Week, serde_json::Error> {
    let mut value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(days) = value.get_mut("days") {
        value = days.take();
    }
    if value.is_null() {
        return Ok(Week::new());
    }
    serde_json::from_value(value)
}

/// `TaskApi` over HTTP using a blocking `ureq` agent
pub struct HttpTaskApi {
    base_url: String,
    http: ureq::Agent,
}

impl HttpTaskApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    fn week_url(&self, key: &WeekKey) -> String {
        format!("{}/api/tasks/{}", self.base_url, key)
    }

    fn task_url(&self, key: &WeekKey, day: usize, task_id: usize) -> String {
        format!("{}/{}/{}", self.week_url(key), day, task_id)
    }

    fn read_json(url: &str, response: ureq::Response) -> ApiResult<serde_json::Value> {
        let body = response.into_string().map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: format!("failed to parse JSON: {e}"),
        })
    }
}

fn request_error(url: &str, error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, _) => ApiError::Status {
            url: url.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}

impl TaskApi for HttpTaskApi {
    fn fetch_week(&self, key: &WeekKey) -> ApiResult<Week> {
        let url = self.week_url(key);
        let response = self.http.get(&url).call().map_err(|e| request_error(&url, e))?;
        let body = response.into_string().map_err(|e| ApiError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;
        parse_week_payload(&body).map_err(|e| ApiError::Decode {
            url,
            message: format!("failed to parse week: {e}"),
        })
    }

    fn store_week(&self, key: &WeekKey, week: &Week) -> ApiResult<()> {
        let url = self.week_url(key);
        self.http
            .post(&url)
            .send_json(StoreWeekBody { days: week })
            .map_err(|e| request_error(&url, e))?;
        Ok(())
    }

    fn delete_week(&self, key: &WeekKey) -> ApiResult<()> {
        let url = self.week_url(key);
        self.http
            .delete(&url)
            .call()
            .map_err(|e| request_error(&url, e))?;
        Ok(())
    }

    fn update_task(
        &self,
        key: &WeekKey,
        day: usize,
        task_id: usize,
        task: &Task,
    ) -> ApiResult<serde_json::Value> {
        let url = self.task_url(key, day, task_id);
        let response = self
            .http
            .put(&url)
            .send_json(task)
            .map_err(|e| request_error(&url, e))?;
        Self::read_json(&url, response)
    }

    fn delete_task(&self, key: &WeekKey, day: usize, task_id: usize) -> ApiResult<serde_json::Value> {
        let url = self.task_url(key, day, task_id);
        let response = self
            .http
            .delete(&url)
            .call()
            .map_err(|e| request_error(&url, e))?;
        Self::read_json(&url, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_wrapped_document() {
        let body = r#"{
            "weekKey": "2024-06-10",
            "days": {"0": [{"text": "Write report", "status": "In Process"}]},
            "createdAt": "2024-06-10T08:00:00Z"
        }"#;
        let week = parse_week_payload(body).unwrap();
        assert_eq!(week.day(0), &[Task::new("Write report", TaskStatus::InProcess)]);
    }

    #[test]
    fn test_parse_bare_day_map() {
        let body = r#"{"2": [{"text": "Gym", "status": "Completed"}]}"#;
        let week = parse_week_payload(body).unwrap();
        assert_eq!(week.day(2), &[Task::new("Gym", TaskStatus::Completed)]);
    }

    #[test]
    fn test_parse_empty_shapes() {
        assert!(parse_week_payload("null").unwrap().is_empty());
        assert!(parse_week_payload("{}").unwrap().is_empty());
        assert!(parse_week_payload(r#"{"days": null}"#).unwrap().is_empty());
        assert!(parse_week_payload("[1, 2]").is_err());
    }

    #[test]
    fn test_store_body_shape() {
        let mut week = Week::new();
        week.save_task(5, Task::new("Brunch", TaskStatus::Default));
        let body = serde_json::to_value(StoreWeekBody { days: &week }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"days": {"5": [{"text": "Brunch", "status": "No status"}]}})
        );
    }

    #[test]
    fn test_urls() {
        let api = HttpTaskApi::new("http://localhost:3000/", Duration::from_secs(1));
        let key: WeekKey = "2024-06-13".parse().unwrap();
        assert_eq!(api.week_url(&key), "http://localhost:3000/api/tasks/2024-06-10");
        assert_eq!(api.task_url(&key, 3, 1), "http://localhost:3000/api/tasks/2024-06-10/3/1");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server
        let api = HttpTaskApi::new("http://127.0.0.1:9", Duration::from_millis(300));
        let key: WeekKey = "2024-06-10".parse().unwrap();
        let err = api.fetch_week(&key).unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
