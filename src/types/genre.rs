use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{
    traits::OptionSource,
    types::{id::Id, null_as_default},
};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id:   Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl OptionSource for Genre {
    fn option_value(&self) -> String {
        self.id.to_string()
    }

    fn option_text(&self) -> String {
        self.name.clone()
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
