//! Integration tests for the room catalog commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_add_room_prints_increasing_ids() {
    let env = TestEnv::new();
    let first = env.add_room("Single", "60.00");
    let second = env.add_room("Double", "95.50");
    assert!(second > first);
}

#[test]
fn test_rooms_json() {
    let env = TestEnv::new();
    let id = env.add_room("Double", "95.50");

    let rooms = env.json(&["rooms"]);
    let rooms = rooms.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], id);
    assert_eq!(rooms[0]["type"], "Double");
    assert_eq!(rooms[0]["price"], "95.50");
    assert_eq!(rooms[0]["price_cents"], 9550);
}

#[test]
fn test_rooms_filtered_by_type_ignores_case() {
    let env = TestEnv::new();
    env.add_room("Single", "60.00");
    env.add_room("Double", "95.00");
    env.add_room("Double", "99.00");

    let rooms = env.json(&["rooms", "--type", "double"]);
    assert_eq!(rooms.as_array().unwrap().len(), 2);
}

#[test]
fn test_rooms_table_has_header() {
    let env = TestEnv::new();
    env.add_room("Single", "60.00");

    env.command()
        .arg("rooms")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID"))
        .stdout(predicate::str::contains("Single"));
}

#[test]
fn test_room_types_are_distinct_and_sorted() {
    let env = TestEnv::new();
    env.add_room("Suite", "300.00");
    env.add_room("Double", "95.00");
    env.add_room("Suite", "320.00");

    let types = env.json(&["room-types"]);
    assert_eq!(types, serde_json::json!(["Double", "Suite"]));
}

#[test]
fn test_update_room() {
    let env = TestEnv::new();
    let id = env.add_room("Single", "60.00");

    env.command()
        .args(["update-room", &id.to_string(), "--price", "65.00"])
        .assert()
        .success();

    let rooms = env.json(&["rooms"]);
    assert_eq!(rooms[0]["price"], "65.00");
    assert_eq!(rooms[0]["type"], "Single");
}

#[test]
fn test_update_room_needs_a_change() {
    let env = TestEnv::new();
    let id = env.add_room("Single", "60.00");

    env.command()
        .args(["update-room", &id.to_string()])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_update_unknown_room() {
    let env = TestEnv::new();
    env.add_room("Single", "60.00");

    env.command()
        .args(["update-room", "42", "--type", "Double"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_blank_room_type_is_rejected() {
    let env = TestEnv::new();

    env.command()
        .args(["add-room", "--type", "  ", "--price", "10.00"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_delete_room_with_past_bookings() {
    let env = TestEnv::new();
    let id = env.add_room("Single", "60.00");
    env.reserve(id, "2020-01-10", "2020-01-12", "a@example.com");

    env.command()
        .args(["delete-room", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 booking"));

    assert_eq!(env.json(&["rooms"]), serde_json::json!([]));
    assert_eq!(env.json(&["bookings"]), serde_json::json!([]));
}

#[test]
fn test_delete_room_with_upcoming_bookings_needs_force() {
    let env = TestEnv::new();
    let id = env.add_room("Single", "60.00");
    env.reserve(id, "2099-01-10", "2099-01-12", "a@example.com");

    env.command()
        .args(["delete-room", &id.to_string()])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("--force"));

    env.command()
        .args(["delete-room", &id.to_string(), "--force"])
        .assert()
        .success();
}
