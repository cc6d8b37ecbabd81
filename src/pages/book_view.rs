use anyhow::Result;
use tracing::{info, warn};

use crate::{
    config::Config,
    http::Client,
    pages::heading,
    route::Route,
    traits::Confirm,
    types::{book::Book, comment::Comment, id::Id},
};

pub const NO_COMMENTS: &str = "No comments yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentItem {
    pub text:       String,
    pub created_at: String,
}

impl From<&Comment> for CommentItem {
    fn from(comment: &Comment) -> Self {
        Self {
            text:       comment.text.clone(),
            created_at: comment.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentsSection {
    /// The "no comments" element is shown.
    Empty,
    List(Vec<CommentItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub id:        Id,
    pub title:     String,
    pub author:    String,
    pub genres:    String,
    pub edit_href: String,
    pub comments:  CommentsSection,
}

impl BookDetails {
    fn new(book: &Book) -> Self {
        Self {
            id:        book.id,
            title:     book.title.clone(),
            author:    book.author_name().to_string(),
            genres:    book.genre_names(),
            edit_href: Route::EditBook(book.id).to_string(),
            comments:  CommentsSection::Empty,
        }
    }
}

#[derive(Debug)]
pub struct BookViewPage<'c> {
    client:  &'c Client,
    id:      Id,
    details: Option<BookDetails>,
}

impl<'c> BookViewPage<'c> {
    /// Loads the book and its comments. If the book can't be loaded the page
    /// stays blank; if only the comments fail, the empty comments state stays.
    pub async fn load(client: &'c Client, id: Id) -> BookViewPage<'c> {
        let mut page = Self {
            client,
            id,
            details: None,
        };
        let book = match client.books().get(id).await {
            Ok(book) => book,
            Err(e) => {
                warn!(%id, error = %e, "failed to load book");
                return page;
            }
        };
        let mut details = BookDetails::new(&book);
        match client.comments().list_by_book(id).await {
            Ok(comments) if !comments.is_empty() => {
                details.comments =
                    CommentsSection::List(comments.iter().map(CommentItem::from).collect());
            }
            Ok(_) => {}
            Err(e) => warn!(%id, error = %e, "failed to load comments"),
        }
        page.details = Some(details);
        page
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn details(&self) -> Option<&BookDetails> {
        self.details.as_ref()
    }

    /// Deletes the book once the user confirms. On success the user is sent
    /// back to the books list. A book that failed to load is never offered
    /// for deletion.
    pub async fn delete(&self, confirm: &mut dyn Confirm) -> Result<Option<Route>> {
        if self.details.is_none() {
            warn!(id = %self.id, "delete skipped, book not loaded");
            return Ok(None);
        }
        let target = Route::DeleteBook(self.id).to_string();
        if !confirm.confirm(&target)? {
            info!(id = %self.id, "delete cancelled");
            return Ok(None);
        }
        self.client.books().remove(self.id).await?;
        info!(id = %self.id, "book deleted");
        Ok(Some(Route::Books))
    }

    pub fn render(&self, config: &Config) -> String {
        let Some(details) = &self.details else {
            return String::new();
        };
        let mut lines = vec![
            config.output_book.format_str(&details.title),
            config.output_author.format_str(&details.author),
            config.output_genre.format_str(&details.genres),
            config.output_link.format_str(&details.edit_href),
            heading(config, "Comments"),
        ];
        match &details.comments {
            CommentsSection::Empty => lines.push(config.output_empty.format_str(NO_COMMENTS)),
            CommentsSection::List(comments) => {
                lines.extend(comments.iter().map(|comment| {
                    format!(
                        "{} {}",
                        config.output_comment.format_str(&comment.text),
                        config.output_timestamp.format_str(&comment.created_at),
                    )
                }))
            }
        }
        lines.join("\n")
    }
}
