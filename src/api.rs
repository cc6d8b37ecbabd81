//! Resource clients: fixed path and method bindings over [Client].

use const_format::formatcp;
use reqwest::Method;

use crate::{
    http::{Client, Result},
    types::{
        author::Author,
        book::{Book, BookForm, BookPatch},
        comment::Comment,
        genre::Genre,
        id::Id,
    },
};

pub const API_PREFIX: &str = "/api/v1";
pub const BOOKS_PATH: &str = formatcp!("{}/books", API_PREFIX);
pub const AUTHORS_PATH: &str = formatcp!("{}/authors", API_PREFIX);
pub const GENRES_PATH: &str = formatcp!("{}/genres", API_PREFIX);

pub fn book_path(id: Id) -> String {
    format!("{BOOKS_PATH}/{id}")
}

pub fn book_comments_path(book_id: Id) -> String {
    format!("{BOOKS_PATH}/{book_id}/comments")
}

impl Client {
    pub fn books(&self) -> BooksApi<'_> {
        BooksApi { client: self }
    }

    pub fn authors(&self) -> AuthorsApi<'_> {
        AuthorsApi { client: self }
    }

    pub fn genres(&self) -> GenresApi<'_> {
        GenresApi { client: self }
    }

    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi { client: self }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooksApi<'c> {
    client: &'c Client,
}

impl BooksApi<'_> {
    pub async fn list(&self) -> Result<Vec<Book>> {
        self.client.get(BOOKS_PATH).await
    }

    pub async fn get(&self, id: Id) -> Result<Book> {
        self.client.get(&book_path(id)).await
    }

    pub async fn create(&self, form: &BookForm) -> Result<Book> {
        self.client.send(Method::POST, BOOKS_PATH, form).await
    }

    pub async fn update(&self, id: Id, form: &BookForm) -> Result<Book> {
        self.client.send(Method::PUT, &book_path(id), form).await
    }

    pub async fn patch(&self, id: Id, patch: &BookPatch) -> Result<Book> {
        self.client.send(Method::PATCH, &book_path(id), patch).await
    }

    /// Deletes a book. The service answers `204 No Content`.
    pub async fn remove(&self, id: Id) -> Result<()> {
        self.client.execute(Method::DELETE, &book_path(id)).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AuthorsApi<'c> {
    client: &'c Client,
}

impl AuthorsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Author>> {
        self.client.get(AUTHORS_PATH).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GenresApi<'c> {
    client: &'c Client,
}

impl GenresApi<'_> {
    pub async fn list(&self) -> Result<Vec<Genre>> {
        self.client.get(GENRES_PATH).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommentsApi<'c> {
    client: &'c Client,
}

impl CommentsApi<'_> {
    pub async fn list_by_book(&self, book_id: Id) -> Result<Vec<Comment>> {
        self.client.get(&book_comments_path(book_id)).await
    }
}
