//! The authors and genres pages: read-only tables of reference data.

use tracing::warn;

use crate::{
    config::Config,
    http::{Client, Result},
    pages::{heading, TableBody},
    types::id::Id,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    pub id:   Id,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Authors,
    Genres,
}

impl Reference {
    pub fn heading(self) -> &'static str {
        match self {
            Reference::Authors => "Authors",
            Reference::Genres => "Genres",
        }
    }

    pub fn empty_text(self) -> &'static str {
        match self {
            Reference::Authors => "No authors yet",
            Reference::Genres => "No genres yet",
        }
    }
}

fn rows<T>(
    items: Result<Vec<T>>,
    what: Reference,
    to_row: impl Fn(&T) -> ReferenceRow,
) -> TableBody<ReferenceRow> {
    match items {
        Ok(items) => TableBody::from_rows(items.iter().map(to_row).collect()),
        Err(e) => {
            warn!(page = what.heading(), error = %e, "failed to load references");
            TableBody::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceListPage {
    pub reference: Reference,
    pub body:      TableBody<ReferenceRow>,
}

impl ReferenceListPage {
    pub async fn load(client: &Client, reference: Reference) -> Self {
        let body = match reference {
            Reference::Authors => rows(client.authors().list().await, reference, |author| {
                ReferenceRow {
                    id:   author.id,
                    name: author.full_name.clone(),
                }
            }),
            Reference::Genres => rows(client.genres().list().await, reference, |genre| {
                ReferenceRow {
                    id:   genre.id,
                    name: genre.name.clone(),
                }
            }),
        };
        Self { reference, body }
    }

    pub fn render(&self, config: &Config) -> String {
        let rows = self.body.render(config, self.reference.empty_text(), |row| {
            format!(
                "{} {}",
                config.output_id.format_str(row.id),
                config.output_book.format_str(&row.name),
            )
        });
        format!("{}\n{rows}", heading(config, self.reference.heading()))
    }
}
