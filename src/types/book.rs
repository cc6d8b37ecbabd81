use serde::{Deserialize, Serialize};

use crate::types::{author::Author, genre::Genre, id::Id, null_as_default};

/// A book as the catalog service returns it.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id:     Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title:  String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Full name of the author, empty when the book has none.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|author| author.full_name.as_str())
            .unwrap_or_default()
    }

    /// Genre names in server order, joined with `", "`.
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Body of a create (`POST`) or full update (`PUT`) request.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title:     String,
    pub author_id: Option<Id>,
    pub genre_ids: Vec<Id>,
}

/// Body of a `PATCH` request. Only the fields that are set get sent.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<Id>>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author_id.is_none() && self.genre_ids.is_none()
    }
}
