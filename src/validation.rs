//! Book form validation, both the checks done before sending and the mapping
//! of the service's validation errors back onto form fields.

use std::collections::BTreeMap;

use crate::{http, types::book::BookForm};

pub const TITLE_BLANK: &str = "Title must not be blank";
pub const AUTHOR_REQUIRED: &str = "Author is required";
pub const GENRES_EMPTY: &str = "Select at least one genre";
pub const SAVE_FAILED: &str = "Save failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    AuthorId,
    GenreIds,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::AuthorId, Field::GenreIds];
    pub const SLOTS: [&'static str; 3] = ["errTitle", "errAuthor", "errGenres"];

    /// Name of the field in request bodies and server messages.
    pub fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::AuthorId => "authorId",
            Field::GenreIds => "genreIds",
        }
    }

    /// Id of the element the field's error is shown in.
    pub fn slot(self) -> &'static str {
        match self {
            Field::Title => Self::SLOTS[0],
            Field::AuthorId => Self::SLOTS[1],
            Field::GenreIds => Self::SLOTS[2],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::AuthorId => "Author",
            Field::GenreIds => "Genres",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Required-field checks run before anything is sent.
pub fn validate_local(form: &BookForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.title.trim().is_empty() {
        errors.insert(Field::Title, TITLE_BLANK);
    }
    if form.author_id.is_none() {
        errors.insert(Field::AuthorId, AUTHOR_REQUIRED);
    }
    if form.genre_ids.is_empty() {
        errors.insert(Field::GenreIds, GENRES_EMPTY);
    }
    errors
}

/// Splits a detail like `"title: must not be blank; authorId: required"` into
/// field/message pairs. Pairs without a `:` are skipped; a repeated field keeps
/// its last message.
pub fn parse_field_errors(detail: &str) -> BTreeMap<String, String> {
    detail
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once(':'))
        .map(|(field, message)| (field.trim().to_string(), message.trim().to_string()))
        .collect()
}

/// The form fields named in a validation detail. Other names are dropped.
pub fn fields_from_detail(detail: &str) -> FieldErrors {
    let parsed = parse_field_errors(detail);
    let mut errors = FieldErrors::new();
    for field in Field::ALL {
        if let Some(message) = parsed.get(field.key()).filter(|m| !m.is_empty()) {
            errors.insert(field, message.clone());
        }
    }
    errors
}

/// How a failed save is reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
    Fields(FieldErrors),
    Toast(String),
}

pub fn classify_save_error(err: &http::Error) -> SaveFailure {
    let Some(api) = err.as_api() else {
        return SaveFailure::Toast(SAVE_FAILED.to_string());
    };
    match api.status {
        400 => {
            let errors = fields_from_detail(&api.detail);
            if errors.is_empty() {
                return SaveFailure::Toast(api.detail.clone());
            }
            return SaveFailure::Fields(errors);
        }
        404 => {
            let lower = api.detail.to_lowercase();
            let mut errors = FieldErrors::new();
            if lower.contains("author") {
                errors.insert(Field::AuthorId, api.detail.clone());
            }
            if lower.contains("genre") {
                errors.insert(Field::GenreIds, api.detail.clone());
            }
            if !errors.is_empty() {
                return SaveFailure::Fields(errors);
            }
        }
        _ => {}
    }
    if api.detail.is_empty() {
        SaveFailure::Toast(SAVE_FAILED.to_string())
    } else {
        SaveFailure::Toast(api.detail.clone())
    }
}
