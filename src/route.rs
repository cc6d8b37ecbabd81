use std::{fmt::Display, str::FromStr};

use crate::types::id::Id;

/// A page of the catalog, addressed the way the web front end addresses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Books,
    NewBook,
    Book(Id),
    EditBook(Id),
    /// Confirmation target of a delete action.
    DeleteBook(Id),
    Authors,
    Genres,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no page at {0:?}")]
    Unknown(String),
    #[error("{0:?} is not a book id")]
    InvalidId(String),
}

fn parse_id(segment: &str) -> Result<Id, RouteError> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(RouteError::InvalidId(segment.to_string()));
    }
    segment
        .parse()
        .map_err(|_| RouteError::InvalidId(segment.to_string()))
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments = path
            .strip_prefix('/')
            .unwrap_or(path)
            .split('/')
            .collect::<Vec<_>>();
        match segments.as_slice() {
            ["books"] => Ok(Route::Books),
            ["books", "new"] => Ok(Route::NewBook),
            ["books", id] => Ok(Route::Book(parse_id(id)?)),
            ["books", id, "edit"] => Ok(Route::EditBook(parse_id(id)?)),
            ["books", id, "delete"] => Ok(Route::DeleteBook(parse_id(id)?)),
            ["authors"] => Ok(Route::Authors),
            ["genres"] => Ok(Route::Genres),
            _ => Err(RouteError::Unknown(s.to_string())),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Books => write!(f, "/books"),
            Route::NewBook => write!(f, "/books/new"),
            Route::Book(id) => write!(f, "/books/{id}"),
            Route::EditBook(id) => write!(f, "/books/{id}/edit"),
            Route::DeleteBook(id) => write!(f, "/books/{id}/delete"),
            Route::Authors => write!(f, "/authors"),
            Route::Genres => write!(f, "/genres"),
        }
    }
}
