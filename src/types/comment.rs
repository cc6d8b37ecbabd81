use serde::{Deserialize, Serialize};

use crate::types::{id::Id, null_as_default, timestamp::Timestamp};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id:         Option<Id>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text:       String,
    #[serde(default)]
    pub created_at: Timestamp,
}
