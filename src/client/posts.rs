use reqwest::StatusCode;
use tracing::debug;

use super::types::{CreatePostBody, EsaPost, ListPostsOptions, PostList, UpdatePostParams};
use super::{check_post_number, decode, expect_status, EsaClient};
use crate::error::{ApiError, ApiResult};

impl EsaClient {
    /// List the team's posts, optionally filtered and paginated.
    pub async fn list_posts(&self, options: ListPostsOptions) -> ApiResult<PostList> {
        let url = self.config.posts_url();
        debug!(%url, ?options, "GET posts");

        let response = self.http.get(&url).query(&options).send().await?;
        let response = expect_status(response, StatusCode::OK).await?;
        decode(response).await
    }

    /// Fetch a single post.
    pub async fn get_post(&self, post_number: i64) -> ApiResult<EsaPost> {
        check_post_number(post_number)?;

        let url = self.config.post_url(post_number);
        debug!(%url, "GET post");

        let response = self.http.get(&url).send().await?;
        let response = expect_status(response, StatusCode::OK).await?;
        decode(response).await
    }

    /// Create a post. esa.io answers `201 Created` with the new post.
    pub async fn create_post(&self, body: CreatePostBody) -> ApiResult<EsaPost> {
        let url = self.config.posts_url();
        debug!(%url, name = %body.post.name, "POST post");

        let response = self.http.post(&url).json(&body).send().await?;
        let response = expect_status(response, StatusCode::CREATED).await?;
        decode(response).await
    }

    /// Apply a non-empty change-set to a post.
    pub async fn update_post(&self, params: UpdatePostParams) -> ApiResult<EsaPost> {
        let UpdatePostParams { post_number, body } = params;
        check_post_number(post_number)?;
        if body.post.is_empty() {
            return Err(ApiError::NoUpdateFields);
        }

        let url = self.config.post_url(post_number);
        debug!(%url, "PATCH post");

        let response = self.http.patch(&url).json(&body).send().await?;
        let response = expect_status(response, StatusCode::OK).await?;
        decode(response).await
    }

    /// Delete a post. esa.io answers `204 No Content`.
    pub async fn delete_post(&self, post_number: i64) -> ApiResult<bool> {
        check_post_number(post_number)?;

        let url = self.config.post_url(post_number);
        debug!(%url, "DELETE post");

        let response = self.http.delete(&url).send().await?;
        expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(true)
    }
}
