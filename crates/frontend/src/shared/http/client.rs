//! Thin authenticated wrapper over `gloo_net`.
//!
//! Every request gets the bearer token from the [`Session`], a bounded
//! timeout, and its own abort signal chained to the signal of the view that
//! issued it. A `401` triggers one token refresh and exactly one retry of the
//! original request.

use std::future::Future;
use std::rc::Rc;

use contracts::shared::envelope::{ErrorBody, RecordEnvelope};
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AbortController, AbortSignal};

use super::{ApiError, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone)]
pub struct ApiClient {
    base: Rc<str>,
    session: Rc<dyn Session>,
    timeout_ms: u32,
    abort: Option<AbortSignal>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, session: Rc<dyn Session>, timeout_ms: u32) -> Self {
        let base: String = base.into();
        Self {
            base: Rc::from(base.trim_end_matches('/')),
            session,
            timeout_ms,
            abort: None,
        }
    }

    /// Copy of the client whose requests are cancelled together with `signal`.
    pub fn with_abort_signal(&self, signal: AbortSignal) -> Self {
        Self {
            abort: Some(signal),
            ..self.clone()
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = match query {
            Some(q) if !q.is_empty() => format!("{}?{}", self.url(path), q),
            _ => self.url(path),
        };
        let response = self.send(Method::Get, &url, None).await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let body = body.map(encode).transpose()?;
        let response = self
            .send(Method::Post, &self.url(path), body.as_deref())
            .await?;
        decode_record(response).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let response = self.send(Method::Put, &self.url(path), Some(&body)).await?;
        decode_record(response).await
    }

    /// POST без обновления токена (вход, обновление токена)
    pub async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let response = self
            .send_once(Method::Post, &self.url(path), Some(&body))
            .await?;
        decode_record(check_status(response).await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, &self.url(path), None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
    ) -> Result<Response, ApiError> {
        let label = format!("{:?} {}", method, url);
        let response = with_refresh(self.session.as_ref(), &label, move || {
            self.send_once(method, url, body)
        })
        .await?;
        check_status(response).await
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
    ) -> Result<Response, ApiError> {
        let mut builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        };
        if let Some(token) = self.session.token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        let abort = RequestAbort::new(self.abort.as_ref());
        let signal = abort.signal();
        builder = builder.abort_signal(signal.as_ref());

        let request = build(builder, body)?;
        let send = async move { request.send().await.map_err(map_transport_error) };
        let result = with_timeout(send, TimeoutFuture::new(self.timeout_ms), || abort.abort()).await;
        if matches!(result, Err(ApiError::Timeout)) {
            log::warn!("{:?} {} timed out after {} ms", method, url, self.timeout_ms);
        }
        result
    }
}

// ============================================================================
// Retry and timeout policy
// ============================================================================

/// Status code of a transport response, enough for the retry policy.
pub trait StatusCode {
    fn status_code(&self) -> u16;
}

impl StatusCode for Response {
    fn status_code(&self) -> u16 {
        self.status()
    }
}

/// Runs `send`; on `401` refreshes the session and repeats it exactly once.
///
/// A failed refresh or a second `401` clears the session.
pub async fn with_refresh<R, F, Fut>(session: &dyn Session, label: &str, mut send: F) -> Result<R, ApiError>
where
    R: StatusCode,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, ApiError>>,
{
    let response = send().await?;
    if response.status_code() != 401 {
        return Ok(response);
    }

    log::info!("{} -> 401, refreshing token", label);
    if let Err(e) = session.refresh_token().await {
        log::warn!("token refresh failed: {}", e);
        session.clear();
        return Err(ApiError::Unauthorized);
    }

    let retry = send().await?;
    if retry.status_code() == 401 {
        session.clear();
        return Err(ApiError::Unauthorized);
    }
    Ok(retry)
}

/// Races `request` against `timer`; `on_timeout` cancels the losing request.
pub async fn with_timeout<T, Req, Tm>(request: Req, timer: Tm, on_timeout: impl FnOnce()) -> Result<T, ApiError>
where
    Req: Future<Output = Result<T, ApiError>>,
    Tm: Future<Output = ()>,
{
    futures::pin_mut!(request);
    futures::pin_mut!(timer);
    match select(request, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            on_timeout();
            Err(ApiError::Timeout)
        }
    }
}

/// Abort handle of one request, also fired when the view's signal aborts.
struct RequestAbort {
    controller: Option<AbortController>,
    parent: Option<AbortSignal>,
    listener: Option<Closure<dyn FnMut()>>,
}

impl RequestAbort {
    fn new(parent: Option<&AbortSignal>) -> Self {
        let Ok(controller) = AbortController::new() else {
            return Self {
                controller: None,
                parent: parent.cloned(),
                listener: None,
            };
        };

        let mut listener = None;
        if let Some(signal) = parent {
            if signal.aborted() {
                controller.abort();
            } else {
                let child = controller.clone();
                let on_abort = Closure::<dyn FnMut()>::new(move || child.abort());
                if signal
                    .add_event_listener_with_callback("abort", on_abort.as_ref().unchecked_ref())
                    .is_ok()
                {
                    listener = Some(on_abort);
                }
            }
        }

        Self {
            controller: Some(controller),
            parent: parent.cloned(),
            listener,
        }
    }

    fn signal(&self) -> Option<AbortSignal> {
        match &self.controller {
            Some(controller) => Some(controller.signal()),
            None => self.parent.clone(),
        }
    }

    fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }
}

impl Drop for RequestAbort {
    fn drop(&mut self) {
        if let (Some(signal), Some(listener)) = (&self.parent, self.listener.take()) {
            let _ = signal.remove_event_listener_with_callback("abort", listener.as_ref().unchecked_ref());
        }
    }
}

fn build(builder: RequestBuilder, body: Option<&str>) -> Result<Request, ApiError> {
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(body.to_string()),
        None => builder.build(),
    };
    request.map_err(|e| ApiError::Network(e.to_string()))
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn map_transport_error(error: gloo_net::Error) -> ApiError {
    match error {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => ApiError::Aborted,
        other => ApiError::Network(other.to_string()),
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if (200..300).contains(&status) {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_from_status(status, &body))
}

/// Maps a non-2xx response to [`ApiError`], keeping the server's message.
pub fn error_from_status(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);
    ApiError::Server { status, message }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn decode_record<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    decode::<RecordEnvelope<T>>(response)
        .await
        .map(RecordEnvelope::into_inner)
}
