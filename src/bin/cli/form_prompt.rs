use std::{collections::HashSet, fmt::Display};

use anyhow::Result;
use shelf::{
    pages::book_form::BookFormPage,
    ui::{Select, SelectOption},
    validation::FieldErrors,
};

use crate::command_parser::FormArgs;

/// An option of a select, shown by its text.
struct Choice<'a>(&'a SelectOption);

impl Display for Choice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.text)
    }
}

fn choices(select: &Select) -> Vec<Choice<'_>> {
    select
        .options()
        .iter()
        .filter(|option| !option.disabled)
        .map(Choice)
        .collect()
}

/// Asks for every field, starting from what the form already holds.
pub fn fill_by_prompt(page: &mut BookFormPage) -> Result<()> {
    let title = inquire::Text::new("Title:")
        .with_initial_value(&page.title)
        .prompt()?;
    page.title = title;
    prompt_author(page)?;
    prompt_genres(page)
}

/// With no authors to choose from the field is left empty, so validation
/// reports it.
fn prompt_author(page: &mut BookFormPage) -> Result<()> {
    let current = page.author.value().to_string();
    let author = {
        let options = choices(&page.author);
        if options.is_empty() {
            None
        } else {
            let cursor = options
                .iter()
                .position(|choice| choice.0.value == current)
                .unwrap_or_default();
            inquire::Select::new("Author:", options)
                .with_starting_cursor(cursor)
                .with_help_message("esc to leave empty")
                .prompt_skippable()?
                .map(|choice| choice.0.value.clone())
        }
    };
    page.author.set_value(author.as_deref().unwrap_or_default());
    Ok(())
}

fn prompt_genres(page: &mut BookFormPage) -> Result<()> {
    let genres = {
        let options = choices(&page.genres);
        if options.is_empty() {
            HashSet::new()
        } else {
            let defaults = options
                .iter()
                .enumerate()
                .filter(|(_, choice)| choice.0.selected)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();
            inquire::MultiSelect::new("Genres:", options)
                .with_default(&defaults)
                .prompt()?
                .into_iter()
                .map(|choice| choice.0.value.clone())
                .collect::<HashSet<_>>()
        }
    };
    page.genres.select_values(&genres);
    Ok(())
}

/// Copies the fields given on the command line onto the form. Ids that match
/// no loaded author or genre come back as field errors.
pub fn fill_by_args(page: &mut BookFormPage, args: &FormArgs) -> FieldErrors {
    if let Some(title) = &args.title {
        page.title = title.clone();
    }
    page.select_by_ids(args.author_id, args.genre_ids.as_deref())
}
