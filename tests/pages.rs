use anyhow::Result;
use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;
use shelf::{
    config::Config,
    http::Client,
    pages::{
        book_form::{BookFormPage, FormLoadError, FormMode, SubmitOutcome, UNKNOWN_AUTHOR},
        book_view::{BookViewPage, CommentsSection},
        books_list::{BooksListPage, EMPTY_STATE},
        references::{Reference, ReferenceListPage, ReferenceRow},
        TableBody,
    },
    route::Route,
    traits::Confirm,
    types::id::Id,
    validation::{Field, AUTHOR_REQUIRED, GENRES_EMPTY, TITLE_BLANK},
};

const JSON: &str = "application/json";
const AUTHORS: &str = r#"[{"id":1,"fullName":"Jane Austen"},{"id":2,"fullName":"Leo Tolstoy"}]"#;
const GENRES: &str = r#"[{"id":3,"name":"Novel"},{"id":4,"name":"Drama"}]"#;
const BOOK: &str = r#"{"id":7,"title":"Anna Karenina","author":{"id":2,"fullName":"Leo Tolstoy"},
    "genres":[{"id":3,"name":"Novel"},{"id":4,"name":"Drama"}]}"#;

/// Records what it was asked and answers with a fixed reply.
struct Answer {
    reply:   bool,
    targets: Vec<String>,
}

impl Answer {
    fn new(reply: bool) -> Self {
        Self {
            reply,
            targets: vec![],
        }
    }
}

impl Confirm for Answer {
    fn confirm(&mut self, target: &str) -> Result<bool> {
        self.targets.push(target.to_string());
        Ok(self.reply)
    }
}

async fn json_mock(server: &mut ServerGuard, method: &str, path: &str, body: &str) -> Mock {
    server
        .mock(method, path)
        .with_status(200)
        .with_header("content-type", JSON)
        .with_body(body)
        .create_async()
        .await
}

/// Mocks for the authors and genres lists; they stay active while held.
async fn references(server: &mut ServerGuard) -> (Mock, Mock) {
    (
        json_mock(server, "GET", "/api/v1/authors", AUTHORS).await,
        json_mock(server, "GET", "/api/v1/genres", GENRES).await,
    )
}

#[tokio::test]
async fn empty_list_shows_only_the_empty_state() {
    let mut server = Server::new_async().await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books", "[]").await;
    let client = Client::new(&server.url()).unwrap();

    let page = BooksListPage::load(&client).await;

    assert!(page.body().is_empty_state());
    assert!(page.body().rows().is_empty());
    assert!(page.render(&Config::default()).contains(EMPTY_STATE));
}

#[tokio::test]
async fn rows_link_to_view_and_edit() {
    let mut server = Server::new_async().await;
    let _m = json_mock(
        &mut server,
        "GET",
        "/api/v1/books",
        &format!(r#"[{BOOK},{{"id":8,"title":"Untitled","author":null,"genres":[]}}]"#),
    )
    .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BooksListPage::load(&client).await;
    let rows = page.body().rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].href, "/books/7");
    assert_eq!(rows[0].edit_href, "/books/7/edit");
    assert_eq!(rows[0].delete_id, "7");
    assert_eq!(rows[0].author, "Leo Tolstoy");
    assert_eq!(rows[0].genres, "Novel, Drama");
    assert_eq!(rows[1].author, "");
    assert_eq!(rows[1].genres, "");
}

#[tokio::test]
async fn failed_list_shows_a_failure_row() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/books")
        .with_status(500)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BooksListPage::load(&client).await;

    assert!(page.body().is_failed());
    assert!(page.render(&Config::default()).contains("Failed to load"));
}

#[tokio::test]
async fn confirmed_delete_removes_and_reloads() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/v1/books")
        .with_status(200)
        .with_header("content-type", JSON)
        .with_body(format!("[{BOOK}]"))
        .expect(2)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/v1/books/7")
        .with_status(204)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = BooksListPage::load(&client).await;
    let mut answer = Answer::new(true);
    assert!(page.delete(Id(7), &mut answer).await.unwrap());

    assert_eq!(answer.targets, vec!["/books/7/delete".to_string()]);
    delete.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let mut server = Server::new_async().await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books", &format!("[{BOOK}]")).await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = BooksListPage::load(&client).await;
    assert!(!page.delete(Id(7), &mut Answer::new(false)).await.unwrap());

    assert_eq!(page.body().rows().len(), 1);
    delete.assert_async().await;
}

#[tokio::test]
async fn book_view_lists_comments() {
    let mut server = Server::new_async().await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books/7", BOOK).await;
    let _m = json_mock(
        &mut server,
        "GET",
        "/api/v1/books/7/comments",
        r#"[{"id":1,"text":"Great","createdAt":"2024-03-01T10:15:30"}]"#,
    )
    .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BookViewPage::load(&client, Id(7)).await;
    let details = page.details().expect("book loaded");

    assert_eq!(details.title, "Anna Karenina");
    assert_eq!(details.edit_href, "/books/7/edit");
    let CommentsSection::List(comments) = &details.comments else {
        panic!("expected comments");
    };
    assert_eq!(comments[0].text, "Great");
    assert_eq!(comments[0].created_at, "2024-03-01 10:15");
}

#[tokio::test]
async fn book_view_keeps_empty_comments_on_failure() {
    let mut server = Server::new_async().await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books/7", BOOK).await;
    let _m = server
        .mock("GET", "/api/v1/books/7/comments")
        .with_status(503)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BookViewPage::load(&client, Id(7)).await;

    assert_eq!(page.details().unwrap().comments, CommentsSection::Empty);
}

#[tokio::test]
async fn missing_book_leaves_the_view_blank() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/books/7")
        .with_status(404)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BookViewPage::load(&client, Id(7)).await;

    assert!(page.details().is_none());
    assert_eq!(page.render(&Config::default()), "");
}

#[tokio::test]
async fn missing_book_is_not_offered_for_deletion() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v1/books/7")
        .with_status(404)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BookViewPage::load(&client, Id(7)).await;
    let mut answer = Answer::new(true);

    assert_eq!(page.delete(&mut answer).await.unwrap(), None);
    assert!(answer.targets.is_empty());
    delete.assert_async().await;
}

#[tokio::test]
async fn deleting_from_the_view_goes_back_to_the_list() {
    let mut server = Server::new_async().await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books/7", BOOK).await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books/7/comments", "[]").await;
    let delete = server
        .mock("DELETE", "/api/v1/books/7")
        .with_status(204)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let page = BookViewPage::load(&client, Id(7)).await;
    let next = page.delete(&mut Answer::new(true)).await.unwrap();

    assert_eq!(next, Some(Route::Books));
    delete.assert_async().await;
}

#[tokio::test]
async fn reference_pages_list_names() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let client = Client::new(&server.url()).unwrap();

    let authors = ReferenceListPage::load(&client, Reference::Authors).await;
    let genres = ReferenceListPage::load(&client, Reference::Genres).await;

    assert_eq!(
        authors.body.rows()[1],
        ReferenceRow {
            id:   Id(2),
            name: "Leo Tolstoy".into(),
        }
    );
    assert_eq!(genres.body.rows().len(), 2);
    assert!(genres.render(&Config::default()).contains("Drama"));
}

#[tokio::test]
async fn form_reports_reference_failure() {
    let mut server = Server::new_async().await;
    let _m = json_mock(&mut server, "GET", "/api/v1/authors", AUTHORS).await;
    let _m = server
        .mock("GET", "/api/v1/genres")
        .with_status(500)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let err = BookFormPage::open(&client, FormMode::Create)
        .await
        .unwrap_err();

    assert!(matches!(err, FormLoadError::References(_)));
    assert_eq!(err.to_string(), "Failed to load references");
}

#[tokio::test]
async fn edit_form_reports_book_failure() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let _m = server
        .mock("GET", "/api/v1/books/7")
        .with_status(404)
        .with_header("content-type", "application/problem+json")
        .with_body(r#"{"title":"Not Found","detail":"Book with id 7 not found"}"#)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let err = BookFormPage::open(&client, FormMode::Edit(Id(7)))
        .await
        .unwrap_err();

    assert!(matches!(err, FormLoadError::Book(_)));
    assert_eq!(err.to_string(), "Failed to load book");
}

#[tokio::test]
async fn unknown_ids_block_the_save() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let create = server
        .mock("POST", "/api/v1/books")
        .expect(0)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = BookFormPage::open(&client, FormMode::Create).await.unwrap();
    page.title = "Emma".into();
    let errors = page.select_by_ids(Some(Id(42)), Some(&[Id(3), Id(99)]));

    assert_eq!(errors.len(), 2);
    assert_eq!(
        page.field_error(Field::AuthorId),
        Some(format!("{UNKNOWN_AUTHOR} 42").as_str())
    );
    assert!(page.field_error(Field::GenreIds).unwrap().ends_with("99"));
    assert_eq!(page.author.value(), "");
    assert!(page.genres.selected_values().is_empty());
    create.assert_async().await;
}

#[tokio::test]
async fn known_ids_are_selected_without_errors() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = BookFormPage::open(&client, FormMode::Create).await.unwrap();
    let errors = page.select_by_ids(Some(Id(2)), Some(&[Id(3), Id(4)]));

    assert!(errors.is_empty());
    assert_eq!(page.author.value(), "2");
    assert_eq!(page.genres.selected_values(), vec!["3", "4"]);
}

#[tokio::test]
async fn edit_form_is_populated_from_the_book() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books/7", BOOK).await;
    let client = Client::new(&server.url()).unwrap();

    let page = BookFormPage::open(&client, FormMode::Edit(Id(7)))
        .await
        .unwrap();

    assert_eq!(page.title, "Anna Karenina");
    assert_eq!(page.book_id, Some(Id(7)));
    assert_eq!(page.author.value(), "2");
    assert_eq!(page.genres.selected_values(), vec!["3", "4"]);
}

#[tokio::test]
async fn local_validation_blocks_the_request() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let create = server
        .mock("POST", "/api/v1/books")
        .expect(0)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = BookFormPage::open(&client, FormMode::Create).await.unwrap();
    page.title = "   ".into();

    assert_eq!(page.submit(&client).await, SubmitOutcome::Invalid);
    assert_eq!(page.field_error(Field::Title), Some(TITLE_BLANK));
    assert_eq!(page.field_error(Field::AuthorId), Some(AUTHOR_REQUIRED));
    assert_eq!(page.field_error(Field::GenreIds), Some(GENRES_EMPTY));
    create.assert_async().await;
}

async fn filled_form(client: &Client) -> BookFormPage {
    let mut page = BookFormPage::open(client, FormMode::Create).await.unwrap();
    page.title = "  Emma ".into();
    assert!(page.select_author(Id(1)));
    assert!(page.select_genres(&[Id(3)]).is_empty());
    page
}

#[tokio::test]
async fn saved_book_redirects_to_its_page() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let create = server
        .mock("POST", "/api/v1/books")
        .match_body(Matcher::Json(
            json!({"title": "Emma", "authorId": 1, "genreIds": [3]}),
        ))
        .with_status(201)
        .with_header("content-type", JSON)
        .with_body(r#"{"id":12,"title":"Emma","author":{"id":1,"fullName":"Jane Austen"},"genres":[]}"#)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = filled_form(&client).await;

    assert_eq!(
        page.submit(&client).await,
        SubmitOutcome::Redirect(Route::Book(Id(12)))
    );
    create.assert_async().await;
}

#[tokio::test]
async fn validation_errors_land_on_their_fields() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let _m = server
        .mock("POST", "/api/v1/books")
        .with_status(400)
        .with_header("content-type", "application/problem+json")
        .with_body(r#"{"title":"Bad Request","detail":"title: must not be blank; authorId: required"}"#)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = filled_form(&client).await;

    assert_eq!(page.submit(&client).await, SubmitOutcome::Invalid);
    assert_eq!(page.field_error(Field::Title), Some("must not be blank"));
    assert_eq!(page.field_error(Field::AuthorId), Some("required"));
    assert_eq!(page.field_error(Field::GenreIds), None);
}

#[tokio::test]
async fn unknown_genre_is_shown_on_genres() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let _m = server
        .mock("PUT", "/api/v1/books/7")
        .with_status(404)
        .with_header("content-type", JSON)
        .with_body(r#"{"title":"Not Found","detail":"Genre with id 3 not found"}"#)
        .create_async()
        .await;
    let _m = json_mock(&mut server, "GET", "/api/v1/books/7", BOOK).await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = BookFormPage::open(&client, FormMode::Edit(Id(7)))
        .await
        .unwrap();

    assert_eq!(page.submit(&client).await, SubmitOutcome::Invalid);
    assert_eq!(page.field_error(Field::GenreIds), Some("Genre with id 3 not found"));
    assert_eq!(page.field_error(Field::AuthorId), None);
}

#[tokio::test]
async fn server_failure_is_toasted() {
    let mut server = Server::new_async().await;
    let _refs = references(&mut server).await;
    let _m = server
        .mock("POST", "/api/v1/books")
        .with_status(500)
        .create_async()
        .await;
    let client = Client::new(&server.url()).unwrap();

    let mut page = filled_form(&client).await;

    assert_eq!(
        page.submit(&client).await,
        SubmitOutcome::Toast("Request failed".into())
    );
    assert!(page.errors.visible().next().is_none());
}

#[test]
fn table_body_distinguishes_empty_from_failed() {
    let empty: TableBody<u8> = TableBody::from_rows(vec![]);
    assert!(empty.is_empty_state());
    assert!(!empty.is_failed());
    assert_eq!(TableBody::from_rows(vec![1u8]).rows(), &[1]);
}
