//! Post tools.
//!
//! Tools: get_posts, get_post_detail, create_post, update_post, delete_post

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::client::types::{
    CreatePostBody, EsaPost, ListPostsOptions, NewPost, PostChanges, PostList, UpdatePostBody,
    UpdatePostParams,
};
use crate::client::EsaClient;
use crate::schema;
use crate::tools::args::{
    check_non_empty, check_positive, check_range, optional_whole_number, whole_number, FieldError,
    ToolArgs, INVALID_POST_NUMBER,
};
use crate::tools::executor::{ApiFuture, ParamError, ToolLogic};
use crate::tools::ToolEntry;

/// Largest page size esa.io accepts.
pub const MAX_PER_PAGE: i64 = 100;

// ── Arguments ────────────────────────────────────────────────────────────

/// Arguments of `get_posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsArgs {
    /// esa search query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Page number.
    #[serde(
        default,
        deserialize_with = "page_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<i64>,
    /// Page size.
    #[serde(
        default,
        deserialize_with = "per_page_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub per_page: Option<i64>,
}

impl ToolArgs for ListPostsArgs {
    fn input_schema() -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "q": {
                    "type": "string",
                    "description": "Search query (e.g., 'in:category path/to/category')"
                },
                "page": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Page number for pagination"
                },
                "per_page": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_PER_PAGE,
                    "description": "Number of items per page (1-100)"
                }
            },
            "required": []
        })
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(page) = self.page {
            check_positive(&mut errors, "page", page, "must be a positive integer");
        }
        if let Some(per_page) = self.per_page {
            check_range(&mut errors, "per_page", per_page, 1, MAX_PER_PAGE);
        }
        errors
    }
}

/// Arguments of the tools addressing one post by number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostNumberArgs {
    /// Post number.
    #[serde(deserialize_with = "post_number_field")]
    pub post_number: i64,
}

impl ToolArgs for PostNumberArgs {
    fn input_schema() -> JsonValue {
        schema!(object {
            required: { "post_number": post_number }
        })
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_positive(&mut errors, "post_number", self.post_number, INVALID_POST_NUMBER);
        errors
    }
}

/// Arguments of `create_post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostArgs {
    /// Title.
    pub name: String,
    /// Markdown body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Category path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Work in progress. New posts are WIP unless told otherwise.
    #[serde(default = "default_wip")]
    pub wip: bool,
    /// Revision message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Owner screen name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

fn default_wip() -> bool {
    true
}

impl ToolArgs for CreatePostArgs {
    fn input_schema() -> JsonValue {
        schema!(object {
            required: { "name": non_empty_string },
            optional: {
                "body_md": string,
                "tags": array_string,
                "category": string,
                "wip": boolean,
                "message": string,
                "user": string
            }
        })
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_non_empty(&mut errors, "name", &self.name, "Post name cannot be empty");
        errors
    }
}

/// Arguments of `update_post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostArgs {
    /// Post to update.
    #[serde(deserialize_with = "post_number_field")]
    pub post_number: i64,
    /// Fields to change.
    pub post: PostChanges,
}

impl ToolArgs for UpdatePostArgs {
    fn input_schema() -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "post_number": schema!(@type post_number),
                "post": {
                    "type": "object",
                    "description": "Fields to change. At least one is required.",
                    "properties": {
                        "name": schema!(@type non_empty_string),
                        "body_md": schema!(@type string),
                        "tags": schema!(@type array_string),
                        "category": schema!(@type string),
                        "wip": schema!(@type boolean),
                        "message": schema!(@type string)
                    },
                    "minProperties": 1
                }
            },
            "required": ["post_number", "post"]
        })
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_positive(&mut errors, "post_number", self.post_number, INVALID_POST_NUMBER);
        if let Some(name) = &self.post.name {
            check_non_empty(&mut errors, "post.name", name, "Post name cannot be empty");
        }
        if self.post.is_empty() {
            errors.push(FieldError::new(
                "post",
                "At least one field in 'post' must be provided for update",
            ));
        }
        errors
    }
}

// ── Tools ────────────────────────────────────────────────────────────────

/// `get_posts`
pub fn get_list() -> ToolEntry<EsaClient> {
    ToolEntry::new(
        "get_posts",
        "Get a list of posts from esa.io, with optional search query and \
         pagination. Returns posts plus prev_page, next_page, total_count, page, \
         per_page and max_per_page.",
        ToolLogic {
            api_fn: list_posts,
            client_params: list_params,
            format_success: None,
        },
    )
}

/// `get_post_detail`
pub fn get_detail() -> ToolEntry<EsaClient> {
    ToolEntry::new(
        "get_post_detail",
        "Get the details of a specific post from esa.io, including its markdown \
         body, tags, category and authors.",
        ToolLogic {
            api_fn: get_post,
            client_params: post_number_params,
            format_success: None,
        },
    )
}

/// `create_post`
pub fn create() -> ToolEntry<EsaClient> {
    ToolEntry::new(
        "create_post",
        "Create a new post on esa.io. Posts are created as WIP unless wip is \
         false.",
        ToolLogic {
            api_fn: create_post,
            client_params: create_params,
            format_success: Some(|post: &EsaPost| {
                format!("Successfully created post #{}: {}", post.number, post.full_name)
            }),
        },
    )
}

/// `update_post`
pub fn update() -> ToolEntry<EsaClient> {
    ToolEntry::new(
        "update_post",
        "Update an existing post on esa.io. Only the fields given in post are \
         changed.",
        ToolLogic {
            api_fn: update_post,
            client_params: update_params,
            format_success: Some(|post: &EsaPost| {
                format!("Successfully updated post #{}: {}", post.number, post.full_name)
            }),
        },
    )
}

/// `delete_post`
pub fn delete() -> ToolEntry<EsaClient> {
    ToolEntry::new(
        "delete_post",
        "Delete a specific post on esa.io.",
        ToolLogic {
            api_fn: delete_post,
            client_params: post_number_params,
            format_success: Some(|_: &bool| "Successfully deleted post.".to_string()),
        },
    )
}

// Integer fields accept whole floats like `5.0`.

fn post_number_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    whole_number(deserializer, "post_number")
}

fn page_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    optional_whole_number(deserializer, "page")
}

fn per_page_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    optional_whole_number(deserializer, "per_page")
}

// ── Operations ───────────────────────────────────────────────────────────

fn list_posts(client: &EsaClient, options: ListPostsOptions) -> ApiFuture<'_, PostList> {
    Box::pin(client.list_posts(options))
}

fn get_post(client: &EsaClient, post_number: i64) -> ApiFuture<'_, EsaPost> {
    Box::pin(client.get_post(post_number))
}

fn create_post(client: &EsaClient, body: CreatePostBody) -> ApiFuture<'_, EsaPost> {
    Box::pin(client.create_post(body))
}

fn update_post(client: &EsaClient, params: UpdatePostParams) -> ApiFuture<'_, EsaPost> {
    Box::pin(client.update_post(params))
}

fn delete_post(client: &EsaClient, post_number: i64) -> ApiFuture<'_, bool> {
    Box::pin(client.delete_post(post_number))
}

// ── Parameter transforms ─────────────────────────────────────────────────

fn list_params(args: ListPostsArgs) -> Result<ListPostsOptions, ParamError> {
    Ok(ListPostsOptions {
        q: args.q.filter(|q| !q.is_empty()),
        page: args.page,
        per_page: args.per_page,
    })
}

fn post_number_params(args: PostNumberArgs) -> Result<i64, ParamError> {
    Ok(args.post_number)
}

fn create_params(args: CreatePostArgs) -> Result<CreatePostBody, ParamError> {
    Ok(CreatePostBody {
        post: NewPost {
            name: args.name,
            body_md: args.body_md,
            tags: args.tags,
            category: args.category,
            wip: args.wip,
            message: args.message,
            user: args.user,
        },
    })
}

fn update_params(args: UpdatePostArgs) -> Result<UpdatePostParams, ParamError> {
    Ok(UpdatePostParams {
        post_number: args.post_number,
        body: UpdatePostBody { post: args.post },
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value as JsonValue};

    use super::*;
    use crate::tools::args::parse_args;

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_list_args_bounds() {
        let parsed: ListPostsArgs = parse_args(args(json!({ "per_page": 100, "page": 2 }))).unwrap();
        assert_eq!(parsed.per_page, Some(100));

        assert!(parse_args::<ListPostsArgs>(args(json!({ "per_page": 101 }))).is_err());
        assert!(parse_args::<ListPostsArgs>(args(json!({ "per_page": 0 }))).is_err());
        assert!(parse_args::<ListPostsArgs>(args(json!({ "page": 0 }))).is_err());
        assert!(parse_args::<ListPostsArgs>(Map::new()).is_ok());
    }

    #[test]
    fn test_list_params_drop_empty_query() {
        let options = list_params(ListPostsArgs {
            q: Some(String::new()),
            page: Some(3),
            per_page: None,
        })
        .unwrap();
        assert_eq!(options.q, None);
        assert_eq!(options.page, Some(3));
    }

    #[test]
    fn test_post_number_must_be_positive() {
        let err = parse_args::<PostNumberArgs>(args(json!({ "post_number": 0 }))).unwrap_err();
        assert_eq!(err.errors[0].message, INVALID_POST_NUMBER);
        assert!(err.to_string().contains("Invalid post number"));

        let err = parse_args::<PostNumberArgs>(args(json!({ "post_number": -4 }))).unwrap_err();
        assert_eq!(err.errors[0].field, "post_number");
    }

    #[test]
    fn test_create_defaults_to_wip() {
        let parsed: CreatePostArgs = parse_args(args(json!({ "name": "T", "body_md": "B" }))).unwrap();
        assert!(parsed.wip);

        let body = create_params(parsed).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "post": { "name": "T", "body_md": "B", "wip": true } })
        );
    }

    #[test]
    fn test_create_requires_name() {
        let err = parse_args::<CreatePostArgs>(args(json!({ "name": "" }))).unwrap_err();
        assert_eq!(err.errors[0].message, "Post name cannot be empty");
        assert!(parse_args::<CreatePostArgs>(args(json!({ "body_md": "B" }))).is_err());
    }

    #[test]
    fn test_update_requires_a_change() {
        let err = parse_args::<UpdatePostArgs>(args(json!({ "post_number": 5, "post": {} }))).unwrap_err();
        assert_eq!(err.errors[0].field, "post");

        let parsed: UpdatePostArgs = parse_args(args(json!({
            "post_number": 5,
            "post": { "body_md": "new body" }
        })))
        .unwrap();
        let params = update_params(parsed).unwrap();
        assert_eq!(params.post_number, 5);
        assert_eq!(params.body.post.body_md.as_deref(), Some("new body"));
    }

    #[test]
    fn test_schemas_advertise_constraints() {
        let list = ListPostsArgs::input_schema();
        assert_eq!(list["properties"]["per_page"]["maximum"], 100);

        let detail = PostNumberArgs::input_schema();
        assert_eq!(detail["required"], json!(["post_number"]));
        assert_eq!(detail["properties"]["post_number"]["minimum"], 1);

        let update = UpdatePostArgs::input_schema();
        assert_eq!(update["properties"]["post"]["minProperties"], 1);
    }
}
