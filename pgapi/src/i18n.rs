//! Response localization.
//!
//! Every user-visible message is a [`Message`] key rendered through [`Message::text`].
//! The [`localize`] middleware negotiates a [`Locale`] from `Accept-Language`, exposes it
//! to handlers through request extensions, and re-renders error bodies in that locale:
//!
//! ```text
//! Request → localize (negotiate, insert Locale) → handler → Error::into_response
//!         ← localize (rewrite body from ErrorMessage extension) ←
//! ```

use crate::api::models::common::ErrorResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, header::ACCEPT_LANGUAGE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use tracing::trace;

/// Languages the API can answer in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ja];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }

    /// Match a language tag by its primary subtag, e.g. `ja-JP` -> `Ja`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.trim();
        Self::ALL.into_iter().find(|locale| primary.eq_ignore_ascii_case(locale.tag()))
    }

    /// Pick the best supported locale from an `Accept-Language` value.
    ///
    /// Entries are ranked by their `q` weight (default 1.0); ties keep header order.
    /// `*` selects `fallback`. Entries with unsupported tags, or a weight outside `(0, 1]`,
    /// are skipped.
    pub fn negotiate(header: Option<&str>, fallback: Locale) -> Locale {
        let Some(header) = header else {
            return fallback;
        };

        let mut best: Option<(f32, Locale)> = None;
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default().trim();
            if tag.is_empty() {
                continue;
            }
            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            // Weights outside (0, 1] are malformed or refusals
            if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
                continue;
            }
            let candidate = if tag == "*" { Some(fallback) } else { Self::from_tag(tag) };
            let Some(locale) = candidate else {
                continue;
            };
            if best.is_none_or(|(q, _)| quality > q) {
                best = Some((quality, locale));
            }
        }

        best.map_or(fallback, |(_, locale)| locale)
    }

    pub fn from_headers(headers: &HeaderMap, fallback: Locale) -> Locale {
        let header = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
        Self::negotiate(header, fallback)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Handlers read the negotiated locale directly; requests that bypassed the middleware
/// get the default.
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Locale>().copied().unwrap_or_default())
    }
}

/// Catalog of every message the API returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    FetchUsersFailed,
    FetchUserFailed,
    CreateUserFailed,
    UpdateUserFailed,
    DeleteUserFailed,
    UserNotFound,
    UserDeleted,
    FetchPostsFailed,
    FetchPostFailed,
    CreatePostFailed,
    UpdatePostFailed,
    DeletePostFailed,
    PostNotFound,
    PostDeleted,
    AuthorNotFound,
    DuplicateValue,
    InvalidRequest,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        use Message::*;
        match locale {
            Locale::En => match self {
                FetchUsersFailed => "Failed to fetch users",
                FetchUserFailed => "Failed to fetch user",
                CreateUserFailed => "Failed to create user",
                UpdateUserFailed => "Failed to update user",
                DeleteUserFailed => "Failed to delete user",
                UserNotFound => "User not found",
                UserDeleted => "User deleted successfully",
                FetchPostsFailed => "Failed to fetch posts",
                FetchPostFailed => "Failed to fetch post",
                CreatePostFailed => "Failed to create post",
                UpdatePostFailed => "Failed to update post",
                DeletePostFailed => "Failed to delete post",
                PostNotFound => "Post not found",
                PostDeleted => "Post deleted successfully",
                AuthorNotFound => "Author not found",
                DuplicateValue => "This value already exists. Please provide a unique value.",
                InvalidRequest => "Invalid request data",
            },
            Locale::Ja => match self {
                FetchUsersFailed => "ユーザー一覧の取得に失敗しました",
                FetchUserFailed => "ユーザー情報の取得に失敗しました",
                CreateUserFailed => "ユーザーの作成に失敗しました",
                UpdateUserFailed => "ユーザーの更新に失敗しました",
                DeleteUserFailed => "ユーザーの削除に失敗しました",
                UserNotFound => "ユーザーが見つかりません",
                UserDeleted => "ユーザーが正常に削除されました",
                FetchPostsFailed => "投稿の取得に失敗しました",
                FetchPostFailed => "投稿情報の取得に失敗しました",
                CreatePostFailed => "投稿の作成に失敗しました",
                UpdatePostFailed => "投稿の更新に失敗しました",
                DeletePostFailed => "投稿の削除に失敗しました",
                PostNotFound => "投稿が見つかりません",
                PostDeleted => "投稿が正常に削除されました",
                AuthorNotFound => "指定された著者が見つかりません",
                DuplicateValue => "このデータは既に存在します。一意の値を指定してください。",
                InvalidRequest => "リクエストデータが不正です",
            },
        }
    }
}

/// Attached to error responses so the body can be rendered after locale negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: Message,
    pub details: Option<String>,
}

impl ErrorMessage {
    pub fn render(&self, locale: Locale) -> ErrorResponse {
        ErrorResponse {
            message: self.message.text(locale).to_string(),
            details: self.details.clone(),
        }
    }
}

/// Negotiate the request locale and localize error bodies.
pub async fn localize(State(default_locale): State<Locale>, mut request: Request<Body>, next: Next) -> Response {
    let locale = Locale::from_headers(request.headers(), default_locale);
    request.extensions_mut().insert(locale);

    let response = next.run(request).await;

    let Some(error) = response.extensions().get::<ErrorMessage>().cloned() else {
        return response;
    };
    if locale == Locale::En {
        return response;
    }

    trace!(%locale, message = ?error.message, "Re-rendering error body");
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let rendered = Json(error.render(locale)).into_response();
    Response::from_parts(parts, rendered.into_body())
}
