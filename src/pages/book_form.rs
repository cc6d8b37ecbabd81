//! Create and edit form for books.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::{
    config::Config,
    http::{self, Client},
    pages::heading,
    route::Route,
    types::{
        book::{Book, BookForm},
        id::Id,
    },
    ui::{ErrorSlots, Select},
    validation::{classify_save_error, validate_local, Field, FieldErrors, SaveFailure},
};

pub const UNKNOWN_AUTHOR: &str = "No author with id";
pub const UNKNOWN_GENRES: &str = "No genre with id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

impl FormMode {
    pub fn from_route(route: Route) -> Option<Self> {
        match route {
            Route::NewBook => Some(FormMode::Create),
            Route::EditBook(id) => Some(FormMode::Edit(id)),
            _ => None,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            FormMode::Create => "Create book",
            FormMode::Edit(_) => "Edit book",
        }
    }
}

/// Why the form could not be shown. The message is what the user is told.
#[derive(Debug, thiserror::Error)]
pub enum FormLoadError {
    #[error("Failed to load references")]
    References(#[source] http::Error),
    #[error("Failed to load book")]
    Book(#[source] http::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; go to the book's page.
    Redirect(Route),
    /// Nothing saved; the field errors are shown on the form.
    Invalid,
    /// Nothing saved; tell the user.
    Toast(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFormPage {
    pub mode:    FormMode,
    pub book_id: Option<Id>,
    pub title:   String,
    pub author:  Select,
    pub genres:  Select,
    pub errors:  ErrorSlots,
}

impl BookFormPage {
    /// An empty form without any options.
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            book_id: None,
            title: String::new(),
            author: Select::single(),
            genres: Select::multiple(),
            errors: ErrorSlots::new(&Field::SLOTS),
        }
    }

    /// Loads authors and genres together, and the book when editing.
    pub async fn open(client: &Client, mode: FormMode) -> Result<Self, FormLoadError> {
        let mut page = Self::new(mode);
        let (authors_api, genres_api) = (client.authors(), client.genres());
        let (authors, genres) = tokio::try_join!(authors_api.list(), genres_api.list())
            .map_err(FormLoadError::References)?;
        page.author.fill_options(&authors, true);
        page.genres.fill_options(&genres, false);

        if let FormMode::Edit(id) = mode {
            let book = client.books().get(id).await.map_err(FormLoadError::Book)?;
            page.populate(&book);
        }
        Ok(page)
    }

    pub fn populate(&mut self, book: &Book) {
        self.book_id = Some(book.id);
        self.title = book.title.clone();
        if let Some(author) = &book.author {
            self.author.set_value(&author.id.to_string());
        }
        let selected = book
            .genres
            .iter()
            .map(|genre| genre.id.to_string())
            .collect::<HashSet<_>>();
        self.genres.select_values(&selected);
    }

    /// Selects the author with this id. Returns false, leaving the selection
    /// untouched, when no loaded author has it.
    pub fn select_author(&mut self, id: Id) -> bool {
        let value = id.to_string();
        if !self.author.has_value(&value) {
            return false;
        }
        self.author.set_value(&value);
        true
    }

    /// Selects exactly these genres. Returns the ids no loaded genre has; the
    /// selection is untouched unless all of them are known.
    pub fn select_genres(&mut self, ids: &[Id]) -> Vec<Id> {
        let unknown = ids
            .iter()
            .copied()
            .filter(|id| !self.genres.has_value(&id.to_string()))
            .collect::<Vec<_>>();
        if unknown.is_empty() {
            let selected = ids.iter().map(Id::to_string).collect::<HashSet<_>>();
            self.genres.select_values(&selected);
        }
        unknown
    }

    /// Selects the given author and genres, showing ids that match no option
    /// as errors on their fields. The returned errors are empty when every id
    /// was found.
    pub fn select_by_ids(
        &mut self,
        author_id: Option<Id>,
        genre_ids: Option<&[Id]>,
    ) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(id) = author_id {
            if !self.select_author(id) {
                errors.insert(Field::AuthorId, format!("{UNKNOWN_AUTHOR} {id}"));
            }
        }
        if let Some(ids) = genre_ids {
            let unknown = self.select_genres(ids);
            if !unknown.is_empty() {
                let ids = unknown.iter().map(Id::to_string).collect::<Vec<_>>();
                errors.insert(Field::GenreIds, format!("{UNKNOWN_GENRES} {}", ids.join(", ")));
            }
        }
        self.apply_errors(&errors);
        errors
    }

    /// Reads the request body off the form.
    pub fn collect(&self) -> BookForm {
        BookForm {
            title:     self.title.trim().to_string(),
            author_id: self.author.value().parse().ok(),
            genre_ids: self
                .genres
                .selected_values()
                .into_iter()
                .filter_map(|value| value.parse().ok())
                .collect(),
        }
    }

    /// Clears all field errors, then shows the given ones.
    pub fn apply_errors(&mut self, errors: &FieldErrors) {
        self.errors.clear_field_errors(&Field::SLOTS);
        for (field, message) in errors.iter() {
            self.errors.set_field_error(field.slot(), message);
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.text(field.slot())
    }

    /// Validates the form and saves it. Invalid input never reaches the
    /// service.
    pub async fn submit(&mut self, client: &Client) -> SubmitOutcome {
        self.errors.clear_field_errors(&Field::SLOTS);

        let form = self.collect();
        let local_errors = validate_local(&form);
        if !local_errors.is_empty() {
            self.apply_errors(&local_errors);
            return SubmitOutcome::Invalid;
        }

        let saved = match self.mode {
            FormMode::Create => client.books().create(&form).await,
            FormMode::Edit(id) => client.books().update(id, &form).await,
        };
        match saved {
            Ok(book) => {
                info!(id = %book.id, "book saved");
                SubmitOutcome::Redirect(Route::Book(book.id))
            }
            Err(e) => {
                warn!(error = %e, "saving book failed");
                match classify_save_error(&e) {
                    SaveFailure::Fields(errors) => {
                        self.apply_errors(&errors);
                        SubmitOutcome::Invalid
                    }
                    SaveFailure::Toast(message) => SubmitOutcome::Toast(message),
                }
            }
        }
    }

    pub fn render(&self, config: &Config) -> String {
        let author = self.author.selected_texts();
        let genres = self.genres.selected_texts();
        let mut lines = vec![
            heading(config, self.mode.heading()),
            config.output_book.format_str(&self.title),
            config.output_author.format_str(author.first().copied().unwrap_or_default()),
            config.output_genre.format_vec(&genres),
        ];
        for field in Field::ALL {
            if let Some(message) = self.field_error(field) {
                lines.push(
                    config
                        .output_field_error
                        .format_str(format!("{}: {}", field.label(), message)),
                );
            }
        }
        lines.join("\n")
    }
}
