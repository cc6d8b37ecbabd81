use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{
    traits::OptionSource,
    types::{id::Id, null_as_default},
};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id:        Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
}

impl OptionSource for Author {
    fn option_value(&self) -> String {
        self.id.to_string()
    }

    fn option_text(&self) -> String {
        self.full_name.clone()
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name)
    }
}
