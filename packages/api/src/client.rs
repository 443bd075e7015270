//! Thin typed wrapper over the backend's REST endpoints.
//!
//! [`ApiClient`] knows paths, bodies and envelopes but nothing about where the
//! credential comes from: every protected method takes the bearer token as an
//! argument. [`crate::Session`] is the layer that reads it from the store.

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use store::AppConfig;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::{Insight, Report, UserInfo, Vital, VitalForm};
use crate::validation::{Credentials, Registration, UploadFile, ValidationError};

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserInfo,
}

#[derive(Deserialize)]
struct ReportsEnvelope {
    #[serde(default)]
    reports: Vec<Report>,
}

#[derive(Deserialize)]
struct ReportEnvelope {
    report: Report,
}

#[derive(Deserialize)]
struct InsightsEnvelope {
    #[serde(default)]
    insights: Vec<Insight>,
}

#[derive(Deserialize)]
struct VitalsEnvelope {
    #[serde(default)]
    vitals: Vec<Vital>,
}

#[derive(Deserialize)]
struct VitalEnvelope {
    #[serde(alias = "vital")]
    vitals: Vital,
}

/// HTTP client for the HealthSync backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: ReqwestClient,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://localhost:5000")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request, attaching the bearer token when given.
    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, path);
        let req = self.client.request(method, &url);
        match token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    /// Build a request for `{prefix}/{id}`.
    ///
    /// The id comes from the route, so it is pushed as a single encoded path
    /// segment; `/`, `?` and `#` cannot reach another endpoint.
    fn item_request(
        &self,
        method: Method,
        prefix: &[&str],
        id: &str,
        token: &str,
    ) -> Result<RequestBuilder, ApiError> {
        if matches!(id.trim(), "" | "." | "..") {
            return Err(ValidationError::InvalidId.into());
        }
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::Network {
            status: None,
            message: format!("Invalid backend URL: {e}"),
        })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Network {
                status: None,
                message: format!("Invalid backend URL: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(prefix)
            .push(id);
        debug!("{} {}", method, url.path());
        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Send and turn any non-2xx into an [`ApiError`].
    async fn execute(&self, req: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body, fallback);
        warn!("Request failed with {}: {}", status, err);
        Err(err)
    }

    /// Send and decode a JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = self.execute(req, fallback).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected response body: {}", e);
            ApiError::Payload("Unexpected response from server".to_string())
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let body = LoginRequest {
            email: credentials.email.trim(),
            password: &credentials.password,
        };
        let req = self.request(Method::POST, "/auth/login", None).json(&body);
        self.fetch(req, "Authentication failed.").await
    }

    pub async fn signup(&self, registration: &Registration) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct SignupRequest<'a> {
            firstname: &'a str,
            lastname: &'a str,
            email: &'a str,
            password: &'a str,
        }

        let body = SignupRequest {
            firstname: registration.firstname.trim(),
            lastname: registration.lastname.trim(),
            email: registration.email.trim(),
            password: &registration.password,
        };
        let req = self.request(Method::POST, "/auth/signup", None).json(&body);
        self.execute(req, "Authentication failed.").await?;
        Ok(())
    }

    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let req = self.request(Method::POST, "/auth/logout", Some(token));
        self.execute(req, "Logout failed").await?;
        Ok(())
    }

    /// `GET /profile/getuser`, the call the auth guard is built on.
    pub async fn get_user(&self, token: &str) -> Result<UserInfo, ApiError> {
        let req = self.request(Method::GET, "/profile/getuser", Some(token));
        let envelope: UserEnvelope = self.fetch(req, "Failed to fetch user").await?;
        Ok(envelope.user)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub async fn my_reports(&self, token: &str) -> Result<Vec<Report>, ApiError> {
        let req = self.request(Method::GET, "/report/myreports", Some(token));
        let envelope: ReportsEnvelope = self.fetch(req, "Failed to fetch reports").await?;
        Ok(envelope.reports)
    }

    pub async fn get_report(&self, token: &str, id: &str) -> Result<Report, ApiError> {
        let req = self.item_request(Method::GET, &["report"], id, token)?;
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let fallback = format!("Error {}: Failed to fetch report", status.as_u16());
            return Err(ApiError::from_status(status.as_u16(), &body, &fallback));
        }
        let body = response.text().await?;
        let envelope: ReportEnvelope = serde_json::from_str(&body)
            .map_err(|_| ApiError::Payload("Report not found".to_string()))?;
        Ok(envelope.report)
    }

    /// Upload a report as multipart field `file`.
    ///
    /// `mime` must already have passed [`crate::validation::validate_upload`].
    pub async fn upload_report(
        &self,
        token: &str,
        file: UploadFile,
        mime: &str,
    ) -> Result<Report, ApiError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime)?;
        let form = Form::new().part("file", part);
        let req = self
            .request(Method::POST, "/report/upload", Some(token))
            .multipart(form);
        let envelope: ReportEnvelope = self.fetch(req, "Upload failed").await?;
        Ok(envelope.report)
    }

    pub async fn delete_report(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let req = self.item_request(Method::DELETE, &["report"], id, token)?;
        self.execute(req, "Failed to delete report").await?;
        Ok(())
    }

    pub async fn insights(&self, token: &str) -> Result<Vec<Insight>, ApiError> {
        let req = self.request(Method::GET, "/report/insights", Some(token));
        let envelope: InsightsEnvelope = self.fetch(req, "Failed to fetch insights").await?;
        Ok(envelope.insights)
    }

    // =========================================================================
    // Vitals
    // =========================================================================

    pub async fn my_vitals(&self, token: &str) -> Result<Vec<Vital>, ApiError> {
        let req = self.request(Method::GET, "/vitals/myvitals", Some(token));
        let envelope: VitalsEnvelope = self.fetch(req, "Failed to fetch vitals").await?;
        Ok(envelope.vitals)
    }

    pub async fn add_vital(&self, token: &str, form: &VitalForm) -> Result<Vital, ApiError> {
        let req = self
            .request(Method::POST, "/vitals/add", Some(token))
            .json(form);
        let envelope: VitalEnvelope = self.fetch(req, "Failed to add vital").await?;
        Ok(envelope.vitals)
    }

    pub async fn delete_vital(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let req = self.item_request(Method::DELETE, &["vitals"], id, token)?;
        self.execute(req, "Failed to delete").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::{
        matchers::{body_json, body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"email": "a@b.com", "password": "password1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "\"tok-1\"",
                "user": {"_id": "u1", "firstname": "Sara", "lastname": "Ali", "email": "a@b.com"}
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let result = client
            .login(&Credentials {
                email: " a@b.com ".into(),
                password: "password1".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.token.as_deref(), Some("\"tok-1\""));
        assert_eq!(result.user.unwrap().firstname, "Sara");
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let err = client
            .login(&Credentials {
                email: "a@b.com".into(),
                password: "password1".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_get_user_sends_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/profile/getuser"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": "u1", "firstname": "Sara", "lastname": "Ali", "email": "a@b.com"}
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&format!("{}/", mock_server.uri()));
        let user = client.get_user("tok-1").await.unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/profile/getuser"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "jwt expired"})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let err = client.get_user("stale").await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "jwt expired");
    }

    #[tokio::test]
    async fn test_malformed_user_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/profile/getuser"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let err = client.get_user("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }

    #[tokio::test]
    async fn test_empty_reports_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/report/myreports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reports": []})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let reports = client.my_reports("tok").await.unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_missing_list_key_decodes_as_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/report/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        assert!(client.insights("tok").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_report_not_found_uses_status_fallback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/report/r404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let err = client.get_report("tok", "r404").await.unwrap_err();
        assert_eq!(err.to_string(), "Error 404: Failed to fetch report");
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/report/upload"))
            .and(header("authorization", "Bearer tok"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"cbc.pdf\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "report": {"_id": "r9", "filename": "cbc.pdf", "fileUrl": "https://f/cbc.pdf"}
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let file = UploadFile::new("cbc.pdf", Some("application/pdf".into()), b"%PDF-1.4".to_vec());
        let report = client
            .upload_report("tok", file, "application/pdf")
            .await
            .unwrap();
        assert_eq!(report.id, "r9");
    }

    #[tokio::test]
    async fn test_upload_object_error_is_stringified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/report/upload"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"name": "GeminiError", "status": 503}
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let file = UploadFile::new("a.png", Some("image/png".into()), vec![1, 2, 3]);
        let err = client
            .upload_report("tok", file, "image/png")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("GeminiError"));
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn test_add_vital_returns_created_entry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vitals/add"))
            .and(body_json(json!({"bp": "120/80", "sugar": "", "weight": "", "note": ""})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "vitals": {"_id": "v1", "bp": "120/80", "date": "2024-05-01T00:00:00Z"}
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let form = VitalForm {
            bp: "120/80".into(),
            ..VitalForm::default()
        };
        let vital = client.add_vital("tok", &form).await.unwrap();
        assert_eq!(vital.id, "v1");
        assert_eq!(vital.bp.as_deref(), Some("120/80"));
    }

    #[tokio::test]
    async fn test_delete_endpoints_ignore_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/report/r1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/vitals/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Deleted"})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        client.delete_report("tok", "r1").await.unwrap();
        client.delete_vital("tok", "v1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_server_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/vitals/v1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        let err = client.delete_vital("tok", "v1").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_route_id_is_one_encoded_segment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/report/a%2F..%2Fb%3Fc"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri());
        client.delete_report("tok", "a/../b?c").await.unwrap();
    }

    #[tokio::test]
    async fn test_dot_ids_are_rejected_without_request() {
        let mock_server = MockServer::start().await;
        let client = ApiClient::new(&mock_server.uri());

        for id in ["", "..", "."] {
            let err = client.delete_report("tok", id).await.unwrap_err();
            assert_eq!(err, ApiError::Validation(ValidationError::InvalidId));
        }
        let err = client.get_report("tok", "..").await.unwrap_err();
        assert_eq!(err, ApiError::Validation(ValidationError::InvalidId));

        let received = mock_server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_base_url_path_is_kept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/vitals/v7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&format!("{}/api/", mock_server.uri()));
        client.delete_vital("tok", "v7").await.unwrap();
    }

    #[tokio::test]
    async fn test_network_failure() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.my_vitals("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Network { status: None, .. }));
    }
}
