//! User tools.
//!
//! Tools: get_user_info

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::client::types::EsaUser;
use crate::client::EsaClient;
use crate::schema;
use crate::tools::args::ToolArgs;
use crate::tools::executor::{ApiFuture, ParamError, ToolLogic};
use crate::tools::ToolEntry;

/// Arguments of a tool that takes none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoArgs {}

impl ToolArgs for NoArgs {
    fn input_schema() -> JsonValue {
        schema!(object {})
    }
}

/// `get_user_info`: the user the configured token belongs to.
pub fn get_info() -> ToolEntry<EsaClient> {
    ToolEntry::new(
        "get_user_info",
        "Get the authenticated esa.io user: id, name, screen_name, email, icon \
         and timestamps.",
        ToolLogic {
            api_fn: get_user,
            client_params: no_params,
            format_success: None,
        },
    )
}

fn get_user(client: &EsaClient, _params: ()) -> ApiFuture<'_, EsaUser> {
    Box::pin(client.get_user())
}

fn no_params(_args: NoArgs) -> Result<(), ParamError> {
    Ok(())
}
