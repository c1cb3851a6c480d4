//! End-to-end GraphQL scenarios over in-memory repositories

use std::sync::Arc;

use async_graphql::{Response, Value};

use board_gateway::api::graphql::{build_schema, ApiSchema};
use board_gateway::api::AppState;
use board_gateway::infrastructure::auth::{KdfDigest, KdfParams, PasswordCodec, TokenService};
use board_gateway::infrastructure::board::InMemoryBoardRepository;
use board_gateway::infrastructure::comment::InMemoryCommentRepository;
use board_gateway::infrastructure::user::{InMemoryUserRepository, UserService};

fn schema() -> ApiSchema {
    let users = Arc::new(InMemoryUserRepository::new());
    // Low iteration count to keep the suite fast
    let codec = PasswordCodec::new(KdfParams::new(10, 32, KdfDigest::Sha512).unwrap());
    let tokens = TokenService::new("integration-test-secret").unwrap();
    let service = Arc::new(UserService::new(users, codec, tokens));

    let boards = Arc::new(InMemoryBoardRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());

    build_schema(AppState::new(service, boards, comments))
}

fn data(response: &Response) -> serde_json::Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.clone().into_json().unwrap()
}

fn error_code(response: &Response) -> String {
    let error = response.errors.first().expect("expected an error");
    match error
        .extensions
        .as_ref()
        .and_then(|extensions| extensions.get("code"))
    {
        Some(Value::String(code)) => code.clone(),
        other => panic!("missing code extension: {:?}", other),
    }
}

async fn register(schema: &ApiSchema, email: &str, name: &str) {
    let query = format!(
        r#"{{ register(email: "{email}", password: "password1", name: "{name}") }}"#
    );
    let response = schema.execute(query).await;
    assert_eq!(data(&response)["register"], serde_json::json!(true));
}

async fn login(schema: &ApiSchema, email: &str) -> String {
    let query = format!(r#"{{ login(email: "{email}", password: "password1") {{ token }} }}"#);
    let response = schema.execute(query).await;
    data(&response)["login"]["token"]
        .as_str()
        .expect("token")
        .to_string()
}

async fn create_board(schema: &ApiSchema, token: &str, title: &str) -> i64 {
    let query = format!(
        r#"{{ createBoard(token: "{token}", title: "{title}", content: "hello") }}"#
    );
    let response = schema.execute(query).await;
    assert_eq!(data(&response)["createBoard"], serde_json::json!(true));

    // The create operation only reports success; recover the pk by title
    let response = schema
        .execute("{ allBoards { pk title } }")
        .await;
    let boards = data(&response);
    boards["allBoards"]
        .as_array()
        .unwrap()
        .iter()
        .find(|board| board["title"] == title)
        .expect("created board listed")["pk"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn test_register_and_login() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let token = login(&schema, "alice@example.com").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_accepts_short_password() {
    let schema = schema();

    let response = schema
        .execute(r#"{ register(email: "a@x.com", password: "p1", name: "A") }"#)
        .await;
    assert_eq!(data(&response)["register"], serde_json::json!(true));

    let response = schema
        .execute(r#"{ login(email: "a@x.com", password: "p1") { token } }"#)
        .await;
    assert!(!data(&response)["login"]["token"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_duplicate_registration() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;

    let response = schema
        .execute(r#"{ register(email: "alice@example.com", password: "password2", name: "B") }"#)
        .await;
    assert_eq!(error_code(&response), "DUPLICATE_USER");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;

    let response = schema
        .execute(r#"{ login(email: "alice@example.com", password: "wrong") { token } }"#)
        .await;
    assert_eq!(error_code(&response), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_email_uses_same_code() {
    let schema = schema();

    let response = schema
        .execute(r#"{ login(email: "nobody@example.com", password: "password1") { token } }"#)
        .await;
    assert_eq!(error_code(&response), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_board_is_write_flag() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    register(&schema, "bob@example.com", "Bob").await;
    let alice = login(&schema, "alice@example.com").await;
    let bob = login(&schema, "bob@example.com").await;

    let pk = create_board(&schema, &alice, "greetings").await;

    // Owner sees isWrite = true
    let response = schema
        .execute(format!(
            r#"{{ board(board_pk: {pk}, token: "{alice}") {{ isWrite }} }}"#
        ))
        .await;
    assert_eq!(data(&response)["board"]["isWrite"], serde_json::json!(true));

    // Another user sees isWrite = false
    let response = schema
        .execute(format!(
            r#"{{ board(board_pk: {pk}, token: "{bob}") {{ isWrite }} }}"#
        ))
        .await;
    assert_eq!(data(&response)["board"]["isWrite"], serde_json::json!(false));

    // Anonymous readers see isWrite = false
    let response = schema
        .execute(format!("{{ board(board_pk: {pk}) {{ isWrite title }} }}"))
        .await;
    let board = data(&response);
    assert_eq!(board["board"]["isWrite"], serde_json::json!(false));
    assert_eq!(board["board"]["title"], serde_json::json!("greetings"));
}

#[tokio::test]
async fn test_board_query_rejects_invalid_token() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let alice = login(&schema, "alice@example.com").await;
    let pk = create_board(&schema, &alice, "greetings").await;

    let response = schema
        .execute(format!(
            r#"{{ board(board_pk: {pk}, token: "garbage") {{ isWrite }} }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "INVALID_TOKEN");

    // The token is checked before the lookup, so a bad token wins even when
    // the board does not exist either
    let response = schema
        .execute(r#"{ board(board_pk: 999, token: "garbage") { isWrite } }"#)
        .await;
    assert_eq!(error_code(&response), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_cross_user_board_deletion_is_forbidden() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    register(&schema, "bob@example.com", "Bob").await;
    let alice = login(&schema, "alice@example.com").await;
    let bob = login(&schema, "bob@example.com").await;

    let pk = create_board(&schema, &alice, "greetings").await;

    let response = schema
        .execute(format!(
            r#"mutation {{ deleteBoard(board_pk: {pk}, token: "{bob}") }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "FORBIDDEN");
}

#[tokio::test]
async fn test_delete_nonexistent_board_is_not_found() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let alice = login(&schema, "alice@example.com").await;

    let response = schema
        .execute(format!(
            r#"mutation {{ deleteBoard(board_pk: 999, token: "{alice}") }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "NOT_FOUND");
}

#[tokio::test]
async fn test_deleted_board_disappears() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let alice = login(&schema, "alice@example.com").await;
    let pk = create_board(&schema, &alice, "greetings").await;

    let response = schema
        .execute(format!(
            r#"mutation {{ deleteBoard(board_pk: {pk}, token: "{alice}") }}"#
        ))
        .await;
    assert_eq!(data(&response)["deleteBoard"], serde_json::json!(true));

    let response = schema
        .execute(format!("{{ board(board_pk: {pk}) {{ title }} }}"))
        .await;
    assert_eq!(error_code(&response), "NOT_FOUND");

    let response = schema.execute("{ allBoards { pk } }").await;
    assert!(data(&response)["allBoards"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_board() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let alice = login(&schema, "alice@example.com").await;
    let pk = create_board(&schema, &alice, "greetings").await;

    let response = schema
        .execute(format!(
            r#"mutation {{ updateBoard(board_pk: {pk}, title: "renamed", token: "{alice}") }}"#
        ))
        .await;
    assert_eq!(data(&response)["updateBoard"], serde_json::json!(true));

    let response = schema
        .execute(format!("{{ board(board_pk: {pk}) {{ title content }} }}"))
        .await;
    let board = data(&response);
    assert_eq!(board["board"]["title"], serde_json::json!("renamed"));
    assert_eq!(board["board"]["content"], serde_json::json!("hello"));
}

#[tokio::test]
async fn test_create_board_rejects_long_title() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let alice = login(&schema, "alice@example.com").await;

    let response = schema
        .execute(format!(
            r#"{{ createBoard(token: "{alice}", title: "tttttttttttttttttttttttttt", content: "x") }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "BAD_USER_INPUT");
}

#[tokio::test]
async fn test_my_boards_lists_only_own() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    register(&schema, "bob@example.com", "Bob").await;
    let alice = login(&schema, "alice@example.com").await;
    let bob = login(&schema, "bob@example.com").await;

    create_board(&schema, &alice, "alice board").await;
    create_board(&schema, &bob, "bob board").await;

    let response = schema
        .execute(format!(r#"{{ myBoards(token: "{alice}") {{ title isWrite }} }}"#))
        .await;
    let boards = data(&response);
    let my_boards = boards["myBoards"].as_array().unwrap();
    assert_eq!(my_boards.len(), 1);
    assert_eq!(my_boards[0]["title"], serde_json::json!("alice board"));
    assert_eq!(my_boards[0]["isWrite"], serde_json::json!(true));
}

#[tokio::test]
async fn test_password_change_via_update_user() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let token = login(&schema, "alice@example.com").await;

    let response = schema
        .execute(format!(
            r#"mutation {{ updateUser(token: "{token}", password: "password2") {{ token user {{ email }} }} }}"#
        ))
        .await;
    let body = data(&response);
    assert!(!body["updateUser"]["token"].as_str().unwrap().is_empty());

    // Old password no longer works
    let response = schema
        .execute(r#"{ login(email: "alice@example.com", password: "password1") { token } }"#)
        .await;
    assert_eq!(error_code(&response), "INVALID_CREDENTIALS");

    // New one does
    let response = schema
        .execute(r#"{ login(email: "alice@example.com", password: "password2") { token } }"#)
        .await;
    assert!(!data(&response)["login"]["token"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_un_register_requires_password() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let token = login(&schema, "alice@example.com").await;

    let response = schema
        .execute(format!(
            r#"mutation {{ unRegister(token: "{token}", password: "wrong") }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "INVALID_CREDENTIALS");

    let response = schema
        .execute(format!(
            r#"mutation {{ unRegister(token: "{token}", password: "password1") }}"#
        ))
        .await;
    assert_eq!(data(&response)["unRegister"], serde_json::json!(true));

    let response = schema.execute("{ allUsers { pk } }").await;
    assert!(data(&response)["allUsers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    register(&schema, "bob@example.com", "Bob").await;
    let alice = login(&schema, "alice@example.com").await;
    let bob = login(&schema, "bob@example.com").await;

    let board_pk = create_board(&schema, &alice, "greetings").await;

    let response = schema
        .execute(format!(
            r#"{{ createComment(token: "{bob}", board_pk: {board_pk}, content: "nice") }}"#
        ))
        .await;
    assert_eq!(data(&response)["createComment"], serde_json::json!(true));

    let response = schema
        .execute(format!(
            "{{ comments(board_pk: {board_pk}) {{ pk content }} }}"
        ))
        .await;
    let body = data(&response);
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], serde_json::json!("nice"));
    let comment_pk = comments[0]["pk"].as_i64().unwrap();

    // Only the author may edit
    let response = schema
        .execute(format!(
            r#"mutation {{ updateComment(token: "{alice}", board_pk: {board_pk}, comment_pk: {comment_pk}, content: "edited") }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "FORBIDDEN");

    let response = schema
        .execute(format!(
            r#"mutation {{ updateComment(token: "{bob}", board_pk: {board_pk}, comment_pk: {comment_pk}, content: "edited") }}"#
        ))
        .await;
    assert_eq!(data(&response)["updateComment"], serde_json::json!(true));

    let response = schema
        .execute(format!(
            r#"mutation {{ deleteComment(token: "{bob}", board_pk: {board_pk}, comment_pk: {comment_pk}) }}"#
        ))
        .await;
    assert_eq!(data(&response)["deleteComment"], serde_json::json!(true));

    let response = schema
        .execute(format!("{{ comments(board_pk: {board_pk}) {{ pk }} }}"))
        .await;
    assert!(data(&response)["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_mutations_check_token_first() {
    let schema = schema();

    let response = schema
        .execute(r#"{ createComment(token: "garbage", board_pk: 1, content: "") }"#)
        .await;
    assert_eq!(error_code(&response), "INVALID_TOKEN");

    let response = schema
        .execute(
            r#"mutation { updateComment(token: "garbage", board_pk: 1, comment_pk: 1, content: "") }"#,
        )
        .await;
    assert_eq!(error_code(&response), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_comment_on_missing_board() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;
    let alice = login(&schema, "alice@example.com").await;

    let response = schema
        .execute(format!(
            r#"{{ createComment(token: "{alice}", board_pk: 42, content: "hi") }}"#
        ))
        .await;
    assert_eq!(error_code(&response), "NOT_FOUND");
}

#[tokio::test]
async fn test_user_queries_hide_credentials() {
    let schema = schema();

    register(&schema, "alice@example.com", "Alice").await;

    let response = schema
        .execute("{ allUsers { pk email name } }")
        .await;
    let body = data(&response);
    let users = body["allUsers"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], serde_json::json!("alice@example.com"));

    // The schema has no field exposing the hash or salt
    let response = schema.execute("{ allUsers { passwordHash } }").await;
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn test_create_board_with_invalid_token() {
    let schema = schema();

    let response = schema
        .execute(r#"{ createBoard(token: "garbage", title: "t", content: "c") }"#)
        .await;
    assert_eq!(error_code(&response), "INVALID_TOKEN");

    // Token verification comes before input validation
    let response = schema
        .execute(
            r#"{ createBoard(token: "garbage", title: "tttttttttttttttttttttttttt", content: "") }"#,
        )
        .await;
    assert_eq!(error_code(&response), "INVALID_TOKEN");
}
