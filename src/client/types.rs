//! esa.io request and response bodies.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field. esa.io sends `null` for
/// several fields (e.g. `message`, `body_html`) on older posts.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The authenticated user (`GET /v1/user`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsaUser {
    /// Numeric user id.
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Handle.
    #[serde(deserialize_with = "nullable")]
    pub screen_name: String,
    /// ISO 8601 creation time.
    #[serde(deserialize_with = "nullable")]
    pub created_at: String,
    /// ISO 8601 last update time.
    #[serde(deserialize_with = "nullable")]
    pub updated_at: String,
    /// Avatar URL.
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    /// Email address.
    #[serde(deserialize_with = "nullable")]
    pub email: String,
}

/// Author summary embedded in a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostAuthor {
    /// Whether this is the calling user.
    pub myself: bool,
    /// Display name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Handle.
    #[serde(deserialize_with = "nullable")]
    pub screen_name: String,
    /// Avatar URL.
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
}

/// A post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsaPost {
    /// Post number, assigned by esa.io.
    pub number: i64,
    /// Title.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Category path plus title, e.g. `日報/2024/04/08/本日の作業`.
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    /// Work in progress.
    pub wip: bool,
    /// Markdown body.
    #[serde(deserialize_with = "nullable")]
    pub body_md: String,
    /// Rendered HTML body.
    #[serde(deserialize_with = "nullable")]
    pub body_html: String,
    /// ISO 8601 creation time.
    #[serde(deserialize_with = "nullable")]
    pub created_at: String,
    /// ISO 8601 last update time.
    #[serde(deserialize_with = "nullable")]
    pub updated_at: String,
    /// Message attached to the latest revision.
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    /// Post URL.
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Tags.
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    /// Category path.
    pub category: Option<String>,
    /// Revision counter.
    pub revision_number: i64,
    /// Creator.
    #[serde(deserialize_with = "nullable")]
    pub created_by: PostAuthor,
    /// Last updater.
    #[serde(deserialize_with = "nullable")]
    pub updated_by: PostAuthor,
}

/// One page of posts (`GET /v1/teams/:team/posts`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostList {
    /// Posts on this page.
    #[serde(deserialize_with = "nullable")]
    pub posts: Vec<EsaPost>,
    /// Previous page number.
    pub prev_page: Option<i64>,
    /// Next page number.
    pub next_page: Option<i64>,
    /// Number of posts matching the query.
    pub total_count: i64,
    /// Current page.
    pub page: i64,
    /// Page size.
    pub per_page: i64,
    /// Largest page size esa.io accepts.
    pub max_per_page: i64,
}

/// Query filters for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListPostsOptions {
    /// esa search query, e.g. `in:category path/to/category`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size, 1 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

/// Body of `POST /v1/teams/:team/posts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePostBody {
    /// The new post.
    pub post: NewPost,
}

/// Fields of a post to create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    /// Title, non-empty.
    pub name: String,
    /// Markdown body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    /// Tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Category path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Work in progress.
    pub wip: bool,
    /// Revision message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Screen name of the owner (team owners only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Body of `PATCH /v1/teams/:team/posts/:number`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePostBody {
    /// Fields to change.
    pub post: PostChanges,
}

/// Change-set for a post. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostChanges {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New markdown body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    /// New tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New category path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New work-in-progress flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip: Option<bool>,
    /// Revision message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PostChanges {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.body_md.is_none()
            && self.tags.is_none()
            && self.category.is_none()
            && self.wip.is_none()
            && self.message.is_none()
    }
}

/// Parameters of the update operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePostParams {
    /// Post to update.
    pub post_number: i64,
    /// Change-set.
    pub body: UpdatePostBody,
}
