use reqwest::StatusCode;
use tracing::debug;

use super::types::EsaUser;
use super::{decode, expect_status, EsaClient};
use crate::error::ApiResult;

impl EsaClient {
    /// Fetch the user the token belongs to.
    pub async fn get_user(&self) -> ApiResult<EsaUser> {
        let url = self.config.user_url();
        debug!(%url, "GET user");

        let response = self.http.get(&url).send().await?;
        let response = expect_status(response, StatusCode::OK).await?;
        decode(response).await
    }
}
