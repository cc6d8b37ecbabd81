use anyhow::Result;
use tracing::{info, warn};

use crate::{
    config::Config,
    http::Client,
    pages::{heading, TableBody},
    route::Route,
    traits::Confirm,
    types::{book::Book, id::Id},
};

pub const EMPTY_STATE: &str = "No books yet";

/// One row of the books table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id:        Id,
    pub title:     String,
    /// Where the title links to.
    pub href:      String,
    pub author:    String,
    pub genres:    String,
    pub edit_href: String,
    pub delete_id: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id:        book.id,
            title:     book.title.clone(),
            href:      Route::Book(book.id).to_string(),
            author:    book.author_name().to_string(),
            genres:    book.genre_names(),
            edit_href: Route::EditBook(book.id).to_string(),
            delete_id: book.id.to_string(),
        }
    }
}

pub fn render_books(books: &[Book]) -> TableBody<BookRow> {
    TableBody::from_rows(books.iter().map(BookRow::from).collect())
}

#[derive(Debug)]
pub struct BooksListPage<'c> {
    client: &'c Client,
    body:   TableBody<BookRow>,
}

impl<'c> BooksListPage<'c> {
    pub async fn load(client: &'c Client) -> BooksListPage<'c> {
        let mut page = Self {
            client,
            body: TableBody::Rows(vec![]),
        };
        page.reload().await;
        page
    }

    pub async fn reload(&mut self) {
        self.body = match self.client.books().list().await {
            Ok(books) => render_books(&books),
            Err(e) => {
                warn!(error = %e, "failed to load books");
                TableBody::Failed
            }
        };
    }

    pub fn body(&self) -> &TableBody<BookRow> {
        &self.body
    }

    /// Deletes a book once the user confirms, then reloads the list.
    ///
    /// Returns whether the book was deleted.
    pub async fn delete(&mut self, id: Id, confirm: &mut dyn Confirm) -> Result<bool> {
        let target = Route::DeleteBook(id).to_string();
        if !confirm.confirm(&target)? {
            info!(%id, "delete cancelled");
            return Ok(false);
        }
        self.client.books().remove(id).await?;
        info!(%id, "book deleted");
        self.reload().await;
        Ok(true)
    }

    pub fn render(&self, config: &Config) -> String {
        let rows = self.body.render(config, EMPTY_STATE, |row| {
            format!(
                "{} {}  {}  {}  {}",
                config.output_id.format_str(row.id),
                config.output_book.format_str(&row.title),
                config.output_author.format_str(&row.author),
                config.output_genre.format_str(&row.genres),
                config.output_link.format_str(&row.edit_href),
            )
        });
        format!("{}\n{rows}", heading(config, "Books"))
    }
}
