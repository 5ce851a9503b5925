//! Minimal client for the remote `/api/my/user/...` backend.
//!
//! Every response follows the `{success, message?, data?}` envelope. Non-2xx
//! statuses and malformed (non-JSON) bodies are normalized into a single
//! error message before they reach the session manager, so the UI only ever
//! sees one human-readable string per failure.
//!
//! NOTE: We never log credentials and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::{UserProfile, UserProfileUpdate};
use crate::error::{CoreError, CoreResult};
use crate::util::trunc_for_log;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The response envelope shared by all user endpoints.
/// No `serde(default)` on the optional fields: that would demand
/// `T: Default`, and missing `Option` fields decode to `None` anyway.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
  pub success: bool,
  pub message: Option<String>,
  pub data: Option<T>,
}

/// Sign-in is the one endpoint that carries token and user at the top level.
#[derive(Debug, Deserialize)]
struct SignInResponse {
  success: bool,
  #[serde(default)] token: Option<String>,
  #[serde(default)] user: Option<UserProfile>,
  #[serde(default)] message: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
  pub first_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub middle_name: Option<String>,
  pub last_name: String,
  pub email: String,
  pub password: String,
}

#[derive(Clone)]
pub struct RemoteApi {
  client: reqwest::Client,
  pub base_url: String,
}

impl RemoteApi {
  pub fn new(base_url: impl Into<String>) -> CoreResult<Self> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(|e| CoreError::RemoteApi(e.to_string()))?;
    Ok(Self { client, base_url: base_url.into() })
  }

  /// Build the client from API_BASE_URL, falling back to localhost.
  pub fn from_env() -> CoreResult<Self> {
    let base_url = std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    Self::new(base_url)
  }

  /// Exchange credentials for a bearer token and the user's profile.
  #[instrument(level = "info", skip(self, password), fields(%email))]
  pub async fn sign_in(&self, email: &str, password: &str) -> CoreResult<(String, UserProfile)> {
    let url = format!("{}/api/my/user/signin", self.base_url);
    let body = serde_json::json!({ "email": email, "password": password });
    let res: SignInResponse = self.send_json(self.client.post(&url).json(&body), "signIn").await?;

    if !res.success {
      return Err(CoreError::RemoteApi(res.message.unwrap_or_else(|| "Sign in failed".into())));
    }
    match (res.token, res.user) {
      (Some(token), Some(user)) => {
        info!(target: "lingua_core", user_id = %user.id, "Sign-in exchange succeeded");
        Ok((token, user))
      }
      _ => Err(CoreError::RemoteApi("Sign in response missing token or user".into())),
    }
  }

  #[instrument(level = "info", skip(self, req), fields(email = %req.email))]
  pub async fn create_user(&self, req: &CreateUserRequest) -> CoreResult<UserProfile> {
    let url = format!("{}/api/my/user/signup", self.base_url);
    let env: ApiResponse<UserProfile> =
      self.send_json(self.client.post(&url).json(req), "createUser").await?;
    require_data(env, "createUser")
  }

  #[instrument(level = "info", skip(self))]
  pub async fn sign_out(&self) -> CoreResult<()> {
    let url = format!("{}/api/my/user/signout", self.base_url);
    let env: ApiResponse<serde_json::Value> =
      self.send_json(self.client.post(&url), "signOut").await?;
    if env.success {
      Ok(())
    } else {
      Err(CoreError::RemoteApi(env.message.unwrap_or_else(|| "Unknown error in signOut".into())))
    }
  }

  #[instrument(level = "info", skip(self), fields(%id))]
  pub async fn get_current_user(&self, id: &str) -> CoreResult<UserProfile> {
    let url = format!("{}/api/my/user/{}", self.base_url, id);
    let env: ApiResponse<UserProfile> =
      self.send_json(self.client.get(&url), "getCurrentUser").await?;
    require_data(env, "getCurrentUser")
  }

  #[instrument(level = "info", skip(self, updates), fields(%id))]
  pub async fn update_current_user(
    &self,
    id: &str,
    updates: &UserProfileUpdate,
  ) -> CoreResult<UserProfile> {
    let url = format!("{}/api/my/user/update/{}", self.base_url, id);
    let env: ApiResponse<UserProfile> =
      self.send_json(self.client.put(&url).json(updates), "updateCurrentUser").await?;
    require_data(env, "updateCurrentUser")
  }

  /// Send a request and decode its JSON body, normalizing every failure mode
  /// (transport, non-2xx, non-JSON) into one `RemoteApi` message.
  async fn send_json<T: DeserializeOwned>(
    &self,
    req: reqwest::RequestBuilder,
    context: &str,
  ) -> CoreResult<T> {
    let res = req
      .header(USER_AGENT, "lingua-core/0.1")
      .header(CONTENT_TYPE, "application/json")
      .send()
      .await
      .map_err(|e| CoreError::RemoteApi(e.to_string()))?;

    let status = res.status();
    let body = res
      .text()
      .await
      .map_err(|e| CoreError::RemoteApi(e.to_string()))?;

    if !status.is_success() {
      let msg = extract_api_error(&body).unwrap_or_else(|| format!("HTTP {status}"));
      return Err(CoreError::RemoteApi(msg));
    }

    serde_json::from_str::<T>(&body).map_err(|_| {
      CoreError::RemoteApi(format!(
        "Received non-JSON response in {context}. The server might be down or returning an error page. Body: {}",
        trunc_for_log(&body, 120)
      ))
    })
  }
}

fn require_data<T>(env: ApiResponse<T>, context: &str) -> CoreResult<T> {
  if env.success {
    if let Some(data) = env.data {
      return Ok(data);
    }
  }
  Err(CoreError::RemoteApi(
    env.message.unwrap_or_else(|| format!("Unknown error in {context}")),
  ))
}

/// Try to extract a clean error message from an error body.
/// Backends use either `message` or `error` for this.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct ErrBody {
    #[serde(default)] message: Option<String>,
    #[serde(default)] error: Option<String>,
  }
  let parsed = serde_json::from_str::<ErrBody>(body).ok()?;
  parsed.message.or(parsed.error)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CoreError;
  use crate::session::{NoopNavigator, SessionManager};
  use crate::store::MemoryStore;
  use crate::util::SystemClock;
  use serde_json::json;
  use std::sync::Arc;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn user_json() -> serde_json::Value {
    json!({
      "id": "u1",
      "email": "a@b.com",
      "firstName": "Ada",
      "lastName": "Lovelace"
    })
  }

  // The envelope must decode for payload types that have no Default impl,
  // with absent optional fields reading as None.
  #[test]
  fn envelope_decodes_without_optional_fields() {
    let env: ApiResponse<UserProfile> =
      serde_json::from_value(json!({ "success": false })).unwrap();
    assert!(!env.success);
    assert!(env.message.is_none());
    assert!(env.data.is_none());

    let env: ApiResponse<UserProfile> =
      serde_json::from_value(json!({ "success": true, "data": user_json() })).unwrap();
    assert_eq!(env.data.unwrap().id, "u1");
  }

  #[tokio::test]
  async fn sign_in_returns_token_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/my/user/signin"))
      .and(body_json(json!({ "email": "a@b.com", "password": "secret1" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "token": "tok-1",
        "user": user_json()
      })))
      .mount(&server)
      .await;

    let api = RemoteApi::new(server.uri()).unwrap();
    let (token, user) = api.sign_in("a@b.com", "secret1").await.unwrap();
    assert_eq!(token, "tok-1");
    assert_eq!(user.email, "a@b.com");
  }

  #[tokio::test]
  async fn failed_envelope_surfaces_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/my/user/signin"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": false,
        "message": "Invalid credentials"
      })))
      .mount(&server)
      .await;

    let api = RemoteApi::new(server.uri()).unwrap();
    match api.sign_in("a@b.com", "wrong").await {
      Err(CoreError::RemoteApi(msg)) => assert_eq!(msg, "Invalid credentials"),
      other => panic!("expected RemoteApi error, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn non_2xx_is_normalized_to_the_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/my/user/u1"))
      .respond_with(ResponseTemplate::new(500).set_body_json(json!({
        "error": "database unavailable"
      })))
      .mount(&server)
      .await;

    let api = RemoteApi::new(server.uri()).unwrap();
    match api.get_current_user("u1").await {
      Err(CoreError::RemoteApi(msg)) => assert_eq!(msg, "database unavailable"),
      other => panic!("expected RemoteApi error, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn html_error_page_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/my/user/signout"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
      .mount(&server)
      .await;

    let api = RemoteApi::new(server.uri()).unwrap();
    match api.sign_out().await {
      Err(CoreError::RemoteApi(msg)) => assert!(msg.contains("non-JSON response")),
      other => panic!("expected RemoteApi error, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn create_user_unwraps_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/my/user/signup"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "created",
        "data": user_json()
      })))
      .mount(&server)
      .await;

    let api = RemoteApi::new(server.uri()).unwrap();
    let user = api
      .create_user(&CreateUserRequest {
        first_name: "Ada".into(),
        middle_name: None,
        last_name: "Lovelace".into(),
        email: "a@b.com".into(),
        password: "secret1".into(),
      })
      .await
      .unwrap();
    assert_eq!(user.id, "u1");
  }

  // Full sign-in/sign-out cycle through the session manager.
  #[tokio::test]
  async fn sign_in_then_logout_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/my/user/signin"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "token": "tok-1",
        "user": user_json()
      })))
      .mount(&server)
      .await;

    let api = RemoteApi::new(server.uri()).unwrap();
    let manager = SessionManager::new(
      Arc::new(MemoryStore::new()),
      Arc::new(MemoryStore::new()),
      Arc::new(NoopNavigator),
      Arc::new(SystemClock),
    );

    let user = manager.sign_in(&api, "a@b.com", "secret1").await.unwrap();
    assert_eq!(user.email, "a@b.com");
    assert!(manager.is_authenticated().await);
    assert_eq!(manager.get_user_data().await.unwrap().email, "a@b.com");

    manager.logout().await.unwrap();
    assert_eq!(manager.get_token().await.unwrap(), None);
    assert!(matches!(
      manager.get_user_data().await,
      Err(CoreError::NotFound(_))
    ));
  }
}
