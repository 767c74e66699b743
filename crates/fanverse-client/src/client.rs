//! HTTP client with bearer injection and one-shot token refresh

use std::time::Duration;

use fanverse_core::{ItemType, Page, Snowflake};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::models::{
    AuthPayload, Envelope, ErrorBody, Like, LikeBody, NewNotice, NewPost, Notice, Post, PostQuery,
    PostUpdate, RefreshBody, SignIn, SignUp, Tokens,
};

/// Whether a call may trigger the refresh-and-retry path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retry {
    OnExpiry,
    Never,
}

/// Client for one API base URL, e.g. `http://localhost:3000/api/v1`
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: RwLock<Tokens>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: RwLock::new(Tokens::default()),
        }
    }

    pub async fn tokens(&self) -> Tokens {
        self.tokens.read().await.clone()
    }

    pub async fn set_tokens(&self, tokens: Tokens) {
        *self.tokens.write().await = tokens;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // === Auth ===

    pub async fn sign_up(&self, request: &SignUp) -> ClientResult<AuthPayload> {
        let payload: AuthPayload = self
            .execute(Retry::Never, |http| {
                http.post(self.url("/auth/sign-up")).json(request)
            })
            .await?;
        self.store(&payload).await;
        Ok(payload)
    }

    pub async fn sign_in(&self, request: &SignIn) -> ClientResult<AuthPayload> {
        let payload: AuthPayload = self
            .execute(Retry::Never, |http| {
                http.post(self.url("/auth/sign-in")).json(request)
            })
            .await?;
        self.store(&payload).await;
        Ok(payload)
    }

    /// Rotate the held refresh token
    pub async fn refresh(&self) -> ClientResult<()> {
        let mut tokens = self.tokens.write().await;
        self.refresh_locked(&mut tokens).await
    }

    /// Revoke the held refresh session and forget both tokens
    pub async fn logout(&self) -> ClientResult<()> {
        let refresh = self.tokens.read().await.refresh.clone();
        let result = self
            .execute::<()>(Retry::OnExpiry, |http| {
                let request = http.post(self.url("/auth/logout"));
                match &refresh {
                    Some(token) => request.json(&RefreshBody {
                        refresh_token: token,
                    }),
                    None => request,
                }
            })
            .await;
        self.tokens.write().await.clear();
        result
    }

    // === Posts ===

    pub async fn create_post(&self, request: &NewPost) -> ClientResult<Post> {
        self.execute(Retry::OnExpiry, |http| {
            http.post(self.url("/post")).json(request)
        })
        .await
    }

    pub async fn find_posts(&self, query: &PostQuery) -> ClientResult<Page<Post>> {
        self.execute(Retry::OnExpiry, |http| {
            http.get(self.url("/post")).query(query)
        })
        .await
    }

    pub async fn find_post(&self, id: Snowflake) -> ClientResult<Post> {
        self.execute(Retry::OnExpiry, |http| {
            http.get(self.url(&format!("/post/{id}")))
        })
        .await
    }

    pub async fn update_post(&self, id: Snowflake, request: &PostUpdate) -> ClientResult<Post> {
        self.execute(Retry::OnExpiry, |http| {
            http.patch(self.url(&format!("/post/{id}"))).json(request)
        })
        .await
    }

    pub async fn remove_post(&self, id: Snowflake) -> ClientResult<()> {
        self.execute(Retry::OnExpiry, |http| {
            http.delete(self.url(&format!("/post/{id}")))
        })
        .await
    }

    pub async fn update_like_status(
        &self,
        item_type: ItemType,
        item_id: Snowflake,
        status: bool,
    ) -> ClientResult<Like> {
        let path = format!("/like/{}/{item_id}", item_type.as_str().to_lowercase());
        self.execute(Retry::OnExpiry, |http| {
            http.post(self.url(&path)).json(&LikeBody { status })
        })
        .await
    }

    // === Notices ===

    pub async fn create_notice(
        &self,
        community_id: Snowflake,
        request: &NewNotice,
    ) -> ClientResult<Notice> {
        self.execute(Retry::OnExpiry, |http| {
            http.post(self.url("/notice"))
                .query(&[("communityId", community_id.to_string())])
                .json(request)
        })
        .await
    }

    pub async fn find_notices(
        &self,
        community_id: Snowflake,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<Page<Notice>> {
        let mut query = vec![("communityId", community_id.to_string())];
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.execute(Retry::OnExpiry, |http| {
            http.get(self.url("/notice")).query(&query)
        })
        .await
    }

    // === Plumbing ===

    async fn store(&self, payload: &AuthPayload) {
        self.set_tokens(Tokens::new(&payload.access_token, &payload.refresh_token))
            .await;
    }

    /// Send a request built by `build`, refreshing and resending once on 401
    async fn execute<T: DeserializeOwned>(
        &self,
        retry: Retry,
        build: impl Fn(&Client) -> RequestBuilder,
    ) -> ClientResult<T> {
        let (response, used_access) = self.dispatch(&build).await?;

        if response.status() == StatusCode::UNAUTHORIZED
            && retry == Retry::OnExpiry
            && self.renew(used_access.as_deref()).await?
        {
            let (retried, _) = self.dispatch(&build).await?;
            return decode(retried).await;
        }

        decode(response).await
    }

    async fn dispatch(
        &self,
        build: &impl Fn(&Client) -> RequestBuilder,
    ) -> ClientResult<(Response, Option<String>)> {
        let access = self.tokens.read().await.access.clone();
        let mut request = build(&self.http);
        if let Some(token) = &access {
            request = request.bearer_auth(token);
        }
        Ok((request.send().await?, access))
    }

    /// Obtain a fresh access token after `stale` was rejected.
    ///
    /// Returns `false` when no refresh token is held, leaving the original
    /// 401 to the caller. Concurrent callers wait on the write lock; if the
    /// pair changed meanwhile the new one is reused instead of refreshing
    /// again with a rotated-out token.
    async fn renew(&self, stale: Option<&str>) -> ClientResult<bool> {
        let mut tokens = self.tokens.write().await;
        if tokens.refresh.is_none() {
            return Ok(false);
        }
        if tokens.access.is_some() && tokens.access.as_deref() != stale {
            return Ok(true);
        }
        self.refresh_locked(&mut tokens).await?;
        Ok(true)
    }

    async fn refresh_locked(&self, tokens: &mut Tokens) -> ClientResult<()> {
        let Some(refresh_token) = tokens.refresh.clone() else {
            return Err(ClientError::SessionExpired);
        };

        debug!("Refreshing access token");
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&RefreshBody {
                refresh_token: &refresh_token,
            })
            .send()
            .await;

        let payload = match response {
            Ok(response) if response.status().is_success() => {
                response.json::<Envelope<AuthPayload>>().await.map(|e| e.data)
            }
            Ok(response) => {
                warn!(status = %response.status(), "Refresh token rejected");
                tokens.clear();
                return Err(ClientError::SessionExpired);
            }
            Err(e) => Err(e),
        };

        match payload {
            Ok(payload) => {
                *tokens = Tokens::new(payload.access_token, payload.refresh_token);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                tokens.clear();
                Err(ClientError::SessionExpired)
            }
        }
    }
}

/// Decode a success envelope or turn the error body into [`ClientError::Api`]
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        let envelope: Envelope<T> = response.json().await?;
        return Ok(envelope.data);
    }

    let text = response.text().await?;
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error.code, body.error.message),
        Err(_) => ("UNKNOWN".to_string(), text),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
