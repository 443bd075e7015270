//! The session boundary.
//!
//! [`Session`] is the only place that reads or writes the credential. Views
//! receive a `Session` through context and call its methods; none of them
//! touch storage or attach headers themselves.
//!
//! Every protected method reads the token synchronously right before it
//! dispatches. With no token stored it fails with [`ApiError::Auth`] and sends
//! nothing. Client-side validation runs before that check, so an invalid form
//! never produces a request either.

use std::future::Future;
use std::sync::Arc;

use store::{normalize_token, AppConfig, CredentialStore};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Insight, Report, UserInfo, Vital, VitalForm};
use crate::resource::{confirm_then_delete, Removal};
use crate::validation::{
    validate_login, validate_signup, validate_upload, validate_vitals, Credentials, Registration,
    UploadFile,
};

#[derive(Clone)]
pub struct Session {
    client: ApiClient,
    store: Arc<dyn CredentialStore>,
}

impl Session {
    pub fn new(client: ApiClient, store: Arc<dyn CredentialStore>) -> Self {
        Self { client, store }
    }

    pub fn from_config(config: &AppConfig, store: impl CredentialStore + 'static) -> Self {
        Self::new(ApiClient::from_config(config), Arc::new(store))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn credential(&self) -> Option<String> {
        self.store.credential()
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.has_credential()
    }

    fn token(&self) -> Result<String, ApiError> {
        self.store.credential().ok_or_else(ApiError::not_logged_in)
    }

    /// Sign in and persist the returned token.
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<UserInfo>, ApiError> {
        validate_login(credentials)?;
        let response = self.client.login(credentials).await?;
        let token = response
            .token
            .as_deref()
            .and_then(normalize_token)
            .ok_or_else(|| ApiError::Payload("Token not received from server".to_string()))?;
        self.store.set_credential(&token);
        info!("Signed in");
        Ok(response.user)
    }

    pub async fn signup(&self, registration: &Registration) -> Result<(), ApiError> {
        validate_signup(registration)?;
        self.client.signup(registration).await
    }

    /// Tell the server, then drop the credential regardless of the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = match self.store.credential() {
            Some(token) => self.client.logout(&token).await,
            None => Ok(()),
        };
        if let Err(ref e) = result {
            warn!("Server logout failed, clearing credential anyway: {}", e);
        }
        self.store.clear();
        info!("Signed out");
        result
    }

    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        let token = self.token()?;
        self.client.get_user(&token).await
    }

    pub async fn my_reports(&self) -> Result<Vec<Report>, ApiError> {
        let token = self.token()?;
        self.client.my_reports(&token).await
    }

    pub async fn report(&self, id: &str) -> Result<Report, ApiError> {
        let token = self.token()?;
        self.client.get_report(&token, id).await
    }

    /// Validate the file against the allow-list, then upload it.
    pub async fn upload_report(&self, file: UploadFile) -> Result<Report, ApiError> {
        let mime = validate_upload(Some(&file.name), file.content_type.as_deref())?;
        let token = self.token()?;
        self.client.upload_report(&token, file, mime).await
    }

    pub async fn delete_report(&self, id: &str) -> Result<(), ApiError> {
        let token = self.token()?;
        self.client.delete_report(&token, id).await
    }

    /// Delete a report once `confirmed` resolves to `true`.
    pub async fn delete_report_confirmed(
        &self,
        id: &str,
        confirmed: impl Future<Output = bool>,
    ) -> Result<Removal, ApiError> {
        confirm_then_delete(id, confirmed, self.delete_report(id)).await
    }

    pub async fn insights(&self) -> Result<Vec<Insight>, ApiError> {
        let token = self.token()?;
        self.client.insights(&token).await
    }

    pub async fn my_vitals(&self) -> Result<Vec<Vital>, ApiError> {
        let token = self.token()?;
        self.client.my_vitals(&token).await
    }

    pub async fn add_vital(&self, form: &VitalForm) -> Result<Vital, ApiError> {
        validate_vitals(form)?;
        let token = self.token()?;
        self.client.add_vital(&token, form).await
    }

    pub async fn delete_vital(&self, id: &str) -> Result<(), ApiError> {
        let token = self.token()?;
        self.client.delete_vital(&token, id).await
    }

    /// Delete a vitals entry once `confirmed` resolves to `true`.
    pub async fn delete_vital_confirmed(
        &self,
        id: &str,
        confirmed: impl Future<Output = bool>,
    ) -> Result<Removal, ApiError> {
        confirm_then_delete(id, confirmed, self.delete_vital(id)).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.client.base_url())
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use store::MemoryStore;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::models::Vital;
    use crate::resource::ResourceList;
    use crate::validation::ValidationError;

    fn reports(ids: &[&str]) -> ResourceList<Report> {
        let mut list = ResourceList::new();
        list.apply_load::<String>(Ok(ids
            .iter()
            .map(|id| Report {
                id: id.to_string(),
                ..Report::default()
            })
            .collect()));
        list
    }

    fn vitals(ids: &[&str]) -> ResourceList<Vital> {
        let mut list = ResourceList::new();
        list.apply_load::<String>(Ok(ids
            .iter()
            .map(|id| Vital {
                id: id.to_string(),
                ..Vital::default()
            })
            .collect()));
        list
    }

    fn item_ids<T: crate::resource::Resource>(list: &ResourceList<T>) -> Vec<String> {
        list.items().iter().map(|item| item.id().to_string()).collect()
    }

    fn session(server: &MockServer, store: &MemoryStore) -> Session {
        Session::from_config(&AppConfig::new(&server.uri()), store.clone())
    }

    async fn request_count(server: &MockServer) -> usize {
        server.received_requests().await.unwrap_or_default().len()
    }

    #[tokio::test]
    async fn test_login_stores_normalized_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "\"abc.def.ghi\"",
                "user": {"_id": "u1", "firstname": "Sara", "email": "a@b.com"}
            })))
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let user = session(&server, &store)
            .login(&Credentials {
                email: "a@b.com".into(),
                password: "password1".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.unwrap().firstname, "Sara");
        assert_eq!(store.credential(), Some("abc.def.ghi".to_string()));
    }

    #[tokio::test]
    async fn test_login_without_token_is_payload_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {}})))
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let err = session(&server, &store)
            .login(&Credentials {
                email: "a@b.com".into(),
                password: "password1".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Payload("Token not received from server".into()));
        assert!(store.credential().is_none());
    }

    #[tokio::test]
    async fn test_short_password_sends_nothing() {
        let server = MockServer::start().await;
        let store = MemoryStore::new();

        let err = session(&server, &store)
            .login(&Credentials {
                email: "a@b.com".into(),
                password: "short".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Validation(ValidationError::PasswordTooShort));
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_signup_validates_names() {
        let server = MockServer::start().await;
        let store = MemoryStore::new();

        let err = session(&server, &store)
            .signup(&Registration {
                firstname: "Jo".into(),
                lastname: "Smith".into(),
                email: "jo@b.com".into(),
                password: "password1".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "First name must be at least 3 characters");
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_signup_posts_registration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        session(&server, &store)
            .signup(&Registration {
                firstname: "Joan".into(),
                lastname: "Smith".into(),
                email: "jo@b.com".into(),
                password: "password1".into(),
            })
            .await
            .unwrap();

        // Sign-up does not sign the user in
        assert!(store.credential().is_none());
    }

    #[tokio::test]
    async fn test_protected_call_without_token_sends_nothing() {
        let server = MockServer::start().await;
        let store = MemoryStore::new();
        let session = session(&server, &store);

        assert!(session.my_reports().await.unwrap_err().is_auth());
        assert!(session.insights().await.unwrap_err().is_auth());
        assert!(session.delete_vital("v1").await.unwrap_err().is_auth());
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_disallowed_upload_sends_nothing() {
        let server = MockServer::start().await;
        let store = MemoryStore::with_token("tok");

        let err = session(&server, &store)
            .upload_report(UploadFile::new(
                "notes.txt",
                Some("text/plain".into()),
                b"hello".to_vec(),
            ))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Only PDF, PNG, JPG allowed!");
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_empty_vitals_send_nothing() {
        let server = MockServer::start().await;
        let store = MemoryStore::with_token("tok");

        let err = session(&server, &store)
            .add_vital(&VitalForm {
                note: "only a note".into(),
                ..VitalForm::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "At least one vital is required");
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_reports_use_stored_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report/myreports"))
            .and(header("authorization", "Bearer tok-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "reports": [{"_id": "r1", "filename": "a.pdf"}]
            })))
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok-7");
        let reports = session(&server, &store).my_reports().await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "r1");
    }

    #[tokio::test]
    async fn test_logout_clears_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok");
        session(&server, &store).logout().await.unwrap();
        assert!(store.credential().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok");
        let result = session(&server, &store).logout().await;
        assert_eq!(result.unwrap_err().to_string(), "Logout failed");
        assert!(store.credential().is_none());
    }

    #[tokio::test]
    async fn test_logout_without_token_is_local_only() {
        let server = MockServer::start().await;
        let store = MemoryStore::new();

        session(&server, &store).logout().await.unwrap();
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_declined_report_delete_sends_nothing() {
        let server = MockServer::start().await;
        let store = MemoryStore::with_token("tok");
        let mut list = reports(&["r1", "r2"]);

        let outcome = session(&server, &store)
            .delete_report_confirmed("r1", std::future::ready(false))
            .await;

        assert_eq!(outcome, Ok(Removal::Cancelled));
        assert!(!list.apply_removal(&outcome));
        assert_eq!(item_ids(&list), vec!["r1", "r2"]);
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_failed_report_delete_keeps_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/report/r1"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok");
        let mut list = reports(&["r1"]);

        let outcome = session(&server, &store)
            .delete_report_confirmed("r1", std::future::ready(true))
            .await;

        assert!(!list.apply_removal(&outcome));
        assert_eq!(outcome.unwrap_err().to_string(), "boom");
        assert_eq!(item_ids(&list), vec!["r1"]);
    }

    #[tokio::test]
    async fn test_confirmed_report_delete_removes_only_that_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/report/r2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok");
        let mut list = reports(&["r1", "r2", "r3"]);

        let outcome = session(&server, &store)
            .delete_report_confirmed("r2", std::future::ready(true))
            .await;

        assert_eq!(outcome, Ok(Removal::Removed("r2".into())));
        assert!(list.apply_removal(&outcome));
        assert_eq!(item_ids(&list), vec!["r1", "r3"]);
    }

    #[tokio::test]
    async fn test_declined_vital_delete_sends_nothing() {
        let server = MockServer::start().await;
        let store = MemoryStore::with_token("tok");
        let mut list = vitals(&["v1"]);

        let outcome = session(&server, &store)
            .delete_vital_confirmed("v1", std::future::ready(false))
            .await;

        assert_eq!(outcome, Ok(Removal::Cancelled));
        assert!(!list.apply_removal(&outcome));
        assert_eq!(item_ids(&list), vec!["v1"]);
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_failed_vital_delete_keeps_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/vitals/v1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok");
        let mut list = vitals(&["v1", "v2"]);

        let outcome = session(&server, &store)
            .delete_vital_confirmed("v1", std::future::ready(true))
            .await;

        assert!(!list.apply_removal(&outcome));
        assert_eq!(outcome.unwrap_err().to_string(), "boom");
        assert_eq!(item_ids(&list), vec!["v1", "v2"]);
    }

    #[tokio::test]
    async fn test_confirmed_vital_delete_removes_only_that_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/vitals/v2"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Deleted"})))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::with_token("tok");
        let mut list = vitals(&["v1", "v2"]);

        let outcome = session(&server, &store)
            .delete_vital_confirmed("v2", std::future::ready(true))
            .await;

        assert!(list.apply_removal(&outcome));
        assert_eq!(item_ids(&list), vec!["v1"]);
    }
}
