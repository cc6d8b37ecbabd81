use std::{env, path::PathBuf, process::exit};

use anyhow::Result;
use clap::ArgMatches;
use dotenvy::dotenv;
use reedline::Signal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod command_parser;
mod form_prompt;
mod prompt;
mod repl;

use command_parser::FormArgs;
use shelf::{
    config::Config,
    http::Client,
    pages::{
        book_form::{BookFormPage, FormMode, SubmitOutcome},
        book_view::BookViewPage,
        books_list::BooksListPage,
        references::{Reference, ReferenceListPage},
    },
    route::Route,
    traits::Confirm,
    types::{book::BookPatch, id::Id},
    ui::{self, AssumeYes, InquireConfirm},
    validation::{classify_save_error, SaveFailure},
};

const LOG_ENV: &str = "SHELF_LOG";

struct App {
    client: Client,
    config: Config,
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(InquireConfirm)
    }
}

/// Shows a page and follows redirects until a page is left on screen.
async fn navigate(app: &App, route: Route, args: &FormArgs, yes: bool) -> Result<()> {
    let mut next = Some(route);
    while let Some(route) = next {
        debug!(%route, "visiting");
        next = visit(app, route, args, yes).await?;
    }
    Ok(())
}

async fn visit(app: &App, route: Route, args: &FormArgs, yes: bool) -> Result<Option<Route>> {
    match route {
        Route::Books => {
            let page = BooksListPage::load(&app.client).await;
            println!("{}", page.render(&app.config));
            Ok(None)
        }
        Route::Book(id) => {
            let page = BookViewPage::load(&app.client, id).await;
            if page.details().is_none() {
                ui::show_toast(&app.config, "Failed to load book");
                return Ok(None);
            }
            println!("{}", page.render(&app.config));
            Ok(None)
        }
        Route::NewBook => edit_book(app, FormMode::Create, args).await,
        Route::EditBook(id) => edit_book(app, FormMode::Edit(id), args).await,
        Route::DeleteBook(id) => {
            let page = BookViewPage::load(&app.client, id).await;
            if page.details().is_none() {
                ui::show_toast(&app.config, "Failed to load book");
                return Ok(None);
            }
            println!("{}", page.render(&app.config));
            match page.delete(confirmer(yes).as_mut()).await {
                Ok(next) => Ok(next),
                Err(e) => {
                    ui::show_toast(&app.config, &e.to_string());
                    Ok(None)
                }
            }
        }
        Route::Authors => {
            let page = ReferenceListPage::load(&app.client, Reference::Authors).await;
            println!("{}", page.render(&app.config));
            Ok(None)
        }
        Route::Genres => {
            let page = ReferenceListPage::load(&app.client, Reference::Genres).await;
            println!("{}", page.render(&app.config));
            Ok(None)
        }
    }
}

async fn edit_book(app: &App, mode: FormMode, args: &FormArgs) -> Result<Option<Route>> {
    let mut page = match BookFormPage::open(&app.client, mode).await {
        Ok(page) => page,
        Err(e) => {
            ui::show_toast(&app.config, &e.to_string());
            return Ok(None);
        }
    };
    if !form_prompt::fill_by_args(&mut page, args).is_empty() {
        println!("{}", page.render(&app.config));
        return Ok(None);
    }
    loop {
        if args.is_empty() {
            form_prompt::fill_by_prompt(&mut page)?;
        }
        match page.submit(&app.client).await {
            SubmitOutcome::Redirect(route) => return Ok(Some(route)),
            SubmitOutcome::Toast(message) => {
                ui::show_toast(&app.config, &message);
                return Ok(None);
            }
            SubmitOutcome::Invalid => {
                println!("{}", page.render(&app.config));
                if !args.is_empty()
                    || !inquire::Confirm::new("Fix the form and try again?")
                        .with_default(true)
                        .prompt()?
                {
                    return Ok(None);
                }
            }
        }
    }
}

async fn patch_book(app: &App, id: Id, args: FormArgs) -> Result<()> {
    let patch = BookPatch {
        title:     args.title,
        author_id: args.author_id,
        genre_ids: args.genre_ids,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to change, pass --title, --author-id or --genre-id");
    }
    match app.client.books().patch(id, &patch).await {
        Ok(book) => navigate(app, Route::Book(book.id), &FormArgs::default(), false).await,
        Err(e) => {
            match classify_save_error(&e) {
                SaveFailure::Fields(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!(
                            "{}",
                            app.config
                                .output_field_error
                                .format_str(format!("{}: {}", field.label(), message))
                        );
                    }
                }
                SaveFailure::Toast(message) => ui::show_toast(&app.config, &message),
            }
            Ok(())
        }
    }
}

async fn delete_book(app: &App, id: Id, yes: bool) -> Result<()> {
    let mut page = BooksListPage::load(&app.client).await;
    match page.delete(id, confirmer(yes).as_mut()).await {
        Ok(true) => println!("{}", page.render(&app.config)),
        Ok(false) => {}
        Err(e) => ui::show_toast(&app.config, &e.to_string()),
    }
    Ok(())
}

async fn handle_command(matches: &ArgMatches, app: &App) -> Result<()> {
    let none = FormArgs::default();
    match matches.subcommand() {
        Some(("books", matches)) => match matches.subcommand() {
            None | Some(("list", _)) => navigate(app, Route::Books, &none, false).await,
            Some(("show", matches)) => {
                let id = command_parser::get_id(matches);
                navigate(app, Route::Book(id), &none, false).await
            }
            Some(("new", matches)) => {
                let args = FormArgs::from_matches(matches);
                navigate(app, Route::NewBook, &args, false).await
            }
            Some(("edit", matches)) => {
                let id = command_parser::get_id(matches);
                let args = FormArgs::from_matches(matches);
                navigate(app, Route::EditBook(id), &args, false).await
            }
            Some(("patch", matches)) => {
                let id = command_parser::get_id(matches);
                patch_book(app, id, FormArgs::from_matches(matches)).await
            }
            Some(("delete", matches)) => {
                let id = command_parser::get_id(matches);
                delete_book(app, id, command_parser::get_yes(matches)).await
            }
            Some((name, _)) => unimplemented!("{}", name),
        },
        Some(("authors", _)) => navigate(app, Route::Authors, &none, false).await,
        Some(("genres", _)) => navigate(app, Route::Genres, &none, false).await,
        Some(("open", matches)) => {
            let path = matches
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or_default();
            let route = path.parse::<Route>()?;
            navigate(app, route, &none, command_parser::get_yes(matches)).await
        }
        Some(("config", _)) => {
            print!("{}", Config::default_as_string()?);
            Ok(())
        }
        Some(("exit", _)) => {
            exit(0);
        }
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
}

async fn handle_line(line: &str, app: &App) -> Result<()> {
    let Some(words) = shlex::split(line) else {
        anyhow::bail!("Invalid command");
    };
    if words.is_empty() {
        return Ok(());
    }
    let matches = command_parser::arg_parser_repl().try_get_matches_from(words)?;
    handle_command(&matches, app).await
}

async fn run_repl(app: &App) -> Result<()> {
    let history_file = PathBuf::from(
        shellexpand::tilde(&app.config.history_file.to_string_lossy()).into_owned(),
    );
    let mut repl = repl::Repl::new(
        command_parser::generate_completions(),
        &history_file,
        prompt::ShelfPrompt::new(app.client.base_url()),
    )?;
    loop {
        match repl.read_line() {
            Ok(Signal::Success(buffer)) => {
                if let Err(e) = handle_line(&buffer, app).await {
                    println!("Error: {}", e);
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nAborted!");
                break;
            }
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::read_config()?;
    let client = Client::new(&config.base_url)?;
    let app = App { client, config };

    let matches = command_parser::arg_parser_cli().get_matches_from(env::args_os().skip(1));
    if let Some(("repl", _)) = matches.subcommand() {
        run_repl(&app).await
    } else {
        handle_command(&matches, &app).await
    }
}
