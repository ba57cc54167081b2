//! Unit tests for the RPC handler: every method dispatched by `handle_method`.
//!
//! These go through the same code path as the `linkboard-rpc` binary, with
//! the app opened on a temporary on-disk SQLite database.

use serde_json::{json, Value};
use tempfile::TempDir;

use linkboard::app::App;
use linkboard::rpc_handler::handle_method;
use linkboard::types::settings::BoardSettings;

/// Create a fresh App backed by a temp directory DB.
fn setup() -> (App, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let settings = BoardSettings {
        database_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        ..BoardSettings::default()
    };
    let app = App::new(settings).expect("Failed to init App");
    (app, tmp)
}

fn call(app: &App, method: &str, params: Value) -> Value {
    handle_method(&app.board, method, &params)
        .unwrap_or_else(|e| panic!("{} failed: {:?}", method, e))
}

fn section(app: &App, name: &str) -> i64 {
    call(app, "section.create", json!({ "name": name }))["id"].as_i64().unwrap()
}

// ─── Ping ───

/// `ping` answers with a pong.
#[test]
fn test_ping() {
    let (app, _tmp) = setup();
    assert_eq!(call(&app, "ping", json!({})), json!({"pong": true}));
}

// ─── Unknown method ───

/// Unknown methods return an `unknown_method` error.
#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let err = handle_method(&app.board, "nonexistent.method", &json!({})).unwrap_err();
    assert_eq!(err.code, "unknown_method");
    assert!(err.message.contains("unknown method"));
}

// ─── Sections ───

/// A created section shows up in `section.list` with no links.
#[test]
fn test_section_create_and_list() {
    let (app, _tmp) = setup();
    let created = call(&app, "section.create", json!({"name": "Reading", "color": "teal"}));
    assert_eq!(created["name"], "Reading");
    assert_eq!(created["color"], "teal");
    assert_eq!(created["sort_order"], 0);

    let list = call(&app, "section.list", json!({}));
    let arr = list.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Reading");
    assert_eq!(arr[0]["links"], json!([]));
}

/// Missing required params are reported as `invalid_params`.
#[test]
fn test_section_create_missing_name() {
    let (app, _tmp) = setup();
    let err = handle_method(&app.board, "section.create", &json!({"color": "red"})).unwrap_err();
    assert_eq!(err.code, "invalid_params");
}

/// A duplicate section name surfaces as a `conflict` code.
#[test]
fn test_section_create_duplicate_is_conflict() {
    let (app, _tmp) = setup();
    section(&app, "Work");
    let err = handle_method(&app.board, "section.create", &json!({"name": " Work "})).unwrap_err();
    assert_eq!(err.code, "conflict");
}

/// An unknown color surfaces as an `invalid_color` code.
#[test]
fn test_section_create_bad_color() {
    let (app, _tmp) = setup();
    let err = handle_method(&app.board, "section.create", &json!({"name": "x", "color": "plaid"}))
        .unwrap_err();
    assert_eq!(err.code, "invalid_color");
}

/// Section update, get and delete go through the handler.
#[test]
fn test_section_get_update_delete() {
    let (app, _tmp) = setup();
    let id = section(&app, "Old");

    let ack = call(&app, "section.update", json!({"id": id, "name": "New", "color": "gold"}));
    assert_eq!(ack, json!({"ok": true}));

    let got = call(&app, "section.get", json!({"id": id}));
    assert_eq!(got["name"], "New");
    assert_eq!(got["color"], "gold");

    call(&app, "section.delete", json!({"id": id}));
    let err = handle_method(&app.board, "section.get", &json!({"id": id})).unwrap_err();
    assert_eq!(err.code, "not_found");
}

/// `section.get` without an id is `invalid_params`.
#[test]
fn test_section_get_missing_id_param() {
    let (app, _tmp) = setup();
    let err = handle_method(&app.board, "section.get", &json!({})).unwrap_err();
    assert_eq!(err.code, "invalid_params");
    assert!(err.message.contains("id"));
}

/// `section.reorder` accepts string ids and reports the count.
#[test]
fn test_section_reorder() {
    let (app, _tmp) = setup();
    let a = section(&app, "a");
    let b = section(&app, "b");

    let res = call(&app, "section.reorder", json!({"ordered_ids": [b.to_string(), "undefined", a]}));
    assert_eq!(res, json!({"ok": true, "count": 2}));

    let list = call(&app, "section.list", json!({}));
    assert_eq!(list[0]["id"], b);
    assert_eq!(list[1]["id"], a);
}

/// `section.reorder` without ids is `invalid_input`.
#[test]
fn test_section_reorder_without_ids_is_invalid_input() {
    let (app, _tmp) = setup();
    section(&app, "a");
    let err = handle_method(&app.board, "section.reorder", &json!({})).unwrap_err();
    assert_eq!(err.code, "invalid_input");
}

// ─── Links ───

/// A link can be added, edited, read back and deleted.
#[test]
fn test_link_add_get_update_delete() {
    let (app, _tmp) = setup();
    let sid = section(&app, "s");

    let link = call(&app, "link.add", json!({
        "section_id": sid,
        "title": "Crates",
        "url": "https://crates.io/crates/serde",
        "notes": "serialization"
    }));
    let id = link["id"].as_i64().unwrap();
    assert_eq!(link["section_id"], sid);
    assert_eq!(link["notes"], "serialization");

    call(&app, "link.update", json!({"id": id, "title": "Serde", "notes": ""}));
    let got = call(&app, "link.get", json!({"id": id}));
    assert_eq!(got["title"], "Serde");
    assert_eq!(got["notes"], Value::Null);

    call(&app, "link.delete", json!({"id": id}));
    let err = handle_method(&app.board, "link.get", &json!({"id": id})).unwrap_err();
    assert_eq!(err.code, "not_found");
}

/// Each of section_id, title and url is required by `link.add`.
#[test]
fn test_link_add_missing_params() {
    let (app, _tmp) = setup();
    let sid = section(&app, "s");
    for params in [
        json!({"title": "t", "url": "https://x.io/a"}),
        json!({"section_id": sid, "url": "https://x.io/a"}),
        json!({"section_id": sid, "title": "t"}),
    ] {
        let err = handle_method(&app.board, "link.add", &params).unwrap_err();
        assert_eq!(err.code, "invalid_params");
    }
}

/// An unparseable url surfaces as `invalid_input`.
#[test]
fn test_link_add_invalid_url() {
    let (app, _tmp) = setup();
    let sid = section(&app, "s");
    let err = handle_method(&app.board, "link.add", &json!({
        "section_id": sid, "title": "bad", "url": "nope"
    }))
    .unwrap_err();
    assert_eq!(err.code, "invalid_input");
    assert!(err.message.contains("Invalid url"));
}

/// Reordered links list in the new order, and a repair afterwards finds nothing to fix.
#[test]
fn test_link_reorder_and_repair() {
    let (app, _tmp) = setup();
    let sid = section(&app, "s");
    let ids: Vec<i64> = (0..3)
        .map(|i| {
            call(&app, "link.add", json!({
                "section_id": sid, "title": format!("t{}", i), "url": format!("https://x.io/{}", i)
            }))["id"]
                .as_i64()
                .unwrap()
        })
        .collect();

    let res = call(&app, "link.reorder", json!({"section_id": sid, "ordered_ids": [ids[2], ids[0], ids[1]]}));
    assert_eq!(res["count"], 3);

    let got = call(&app, "section.get", json!({"id": sid}));
    let order: Vec<i64> = got["links"].as_array().unwrap().iter().map(|l| l["id"].as_i64().unwrap()).collect();
    assert_eq!(order, vec![ids[2], ids[0], ids[1]]);

    let repaired = call(&app, "order.repair", json!({}));
    assert_eq!(repaired, json!({"ok": true, "count": 0}));
}

/// `link.reorder` on an unknown section is `not_found`.
#[test]
fn test_link_reorder_unknown_section() {
    let (app, _tmp) = setup();
    let err = handle_method(&app.board, "link.reorder", &json!({"section_id": 404, "ordered_ids": [1]}))
        .unwrap_err();
    assert_eq!(err.code, "not_found");
}
