//! API request/response models for posts.

use crate::api::models::common::present_or_absent;
use crate::db::handlers::posts::PostFilter;
use crate::db::models::posts::{AuthorDBResponse, PostDBResponse};
use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};

fn positive_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = UserId::deserialize(deserializer)?;
    if id <= 0 {
        return Err(de::Error::custom(format!("id must be a positive integer, got {id}")));
    }
    Ok(id)
}

// Post request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub title: String,
    #[serde(default, deserialize_with = "present_or_absent")]
    pub content: Option<String>,
    /// Defaults to `false` when omitted
    #[serde(default)]
    pub published: bool,
    #[serde(deserialize_with = "positive_id")]
    #[schema(minimum = 1)]
    pub author_id: UserId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PostUpdate {
    #[serde(default, deserialize_with = "present_or_absent")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_or_absent")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present_or_absent")]
    pub published: Option<bool>,
}

/// Reduced projection of the owning user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorSummary {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
}

impl From<AuthorDBResponse> for AuthorSummary {
    fn from(db: AuthorDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
        }
    }
}

// Post response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorSummary,
}

impl From<PostDBResponse> for PostResponse {
    fn from(db: PostDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            content: db.content,
            published: db.published,
            author_id: db.author_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
            author: db.author.into(),
        }
    }
}

/// Accepted spellings of the `published` query flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PublishedFilter {
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
}

impl From<PublishedFilter> for bool {
    fn from(value: PublishedFilter) -> Self {
        matches!(value, PublishedFilter::True)
    }
}

/// Query parameters for listing posts
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// Only return posts with this published flag
    pub published: Option<PublishedFilter>,

    /// Only return posts owned by this user
    pub author_id: Option<UserId>,
}

impl From<ListPostsQuery> for PostFilter {
    fn from(query: ListPostsQuery) -> Self {
        PostFilter {
            published: query.published.map(Into::into),
            author_id: query.author_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_published_to_false() {
        let create: PostCreate = serde_json::from_str(r#"{"title":"t","authorId":4}"#).unwrap();
        assert!(!create.published);
        assert_eq!(create.author_id, 4);
        assert_eq!(create.content, None);
    }

    #[test]
    fn create_requires_positive_author_id() {
        assert!(serde_json::from_str::<PostCreate>(r#"{"title":"t","authorId":0}"#).is_err());
        assert!(serde_json::from_str::<PostCreate>(r#"{"title":"t","authorId":-3}"#).is_err());
        assert!(serde_json::from_str::<PostCreate>(r#"{"title":"t","authorId":"1"}"#).is_err());
        assert!(serde_json::from_str::<PostCreate>(r#"{"authorId":1}"#).is_err());
    }

    #[test]
    fn null_is_not_accepted_for_optional_fields() {
        assert!(serde_json::from_str::<PostCreate>(r#"{"title":"t","authorId":1,"content":null}"#).is_err());
        assert!(serde_json::from_str::<PostCreate>(r#"{"title":"t","authorId":1,"published":null}"#).is_err());
        for body in [r#"{"title":null}"#, r#"{"content":null}"#, r#"{"published":null}"#] {
            assert!(serde_json::from_str::<PostUpdate>(body).is_err(), "{body} should be rejected");
        }

        let update: PostUpdate = serde_json::from_str(r#"{"published":true}"#).unwrap();
        assert_eq!(update.published, Some(true));
        assert!(update.title.is_none());
    }

    #[test]
    fn list_query_maps_to_filter() {
        let query = ListPostsQuery {
            published: Some(PublishedFilter::False),
            author_id: Some(9),
        };
        let filter = PostFilter::from(query);
        assert_eq!(filter.published, Some(false));
        assert_eq!(filter.author_id, Some(9));

        let filter = PostFilter::from(ListPostsQuery::default());
        assert_eq!(filter.published, None);
        assert_eq!(filter.author_id, None);
    }

    #[test]
    fn published_flag_accepts_only_literal_booleans() {
        let parsed: PublishedFilter = serde_json::from_str(r#""true""#).unwrap();
        assert_eq!(parsed, PublishedFilter::True);
        assert!(serde_json::from_str::<PublishedFilter>(r#""yes""#).is_err());
        assert!(serde_json::from_str::<PublishedFilter>(r#""TRUE""#).is_err());
    }
}
