//! BDD step definitions for the composition feature

use std::collections::BTreeMap;

use chrono_tz::Tz;
use cucumber::{given, then, when};

use alert_relay::alert::AlertRecord;
use alert_relay::compose::{compose, format_timestamp};

use crate::world::RelayWorld;

fn parse_zone(zone: &str) -> Tz {
    zone.parse().unwrap_or_else(|_| panic!("unknown time zone {}", zone))
}

fn new_alert(name: String, status: String, timestamp: i64) -> AlertRecord {
    AlertRecord {
        id: "1".to_string(),
        name,
        target: "https://example.com".to_string(),
        kind: "http".to_string(),
        category: "web".to_string(),
        status,
        timestamp,
        errors: BTreeMap::new(),
    }
}

#[given(expr = "an alert named {string} with status {string} at timestamp {int}")]
fn alert_named(world: &mut RelayWorld, name: String, status: String, timestamp: i64) {
    world.alert = Some(new_alert(name, status, timestamp));
}

#[given(expr = "an alert whose name is {int} times {string} with status {string}")]
fn alert_repeated_name(world: &mut RelayWorld, count: usize, unit: String, status: String) {
    world.alert = Some(new_alert(unit.repeat(count), status, 1_700_000_000));
}

#[given(expr = "the alert reports error {string} from {string}")]
fn alert_error(world: &mut RelayWorld, message: String, location: String) {
    let alert = world.alert.as_mut().expect("alert not set");
    alert.errors.insert(location, message);
}

#[when(expr = "the notification is composed in time zone {string}")]
fn compose_notification(world: &mut RelayWorld, zone: String) {
    let alert = world.alert.as_ref().expect("alert not set");
    world.notification = Some(compose(alert, &parse_zone(&zone)));
}

#[when(expr = "timestamp {int} is formatted in time zone {string}")]
fn format_in_zone(world: &mut RelayWorld, timestamp: i64, zone: String) {
    world.formatted_time = Some(format_timestamp(timestamp, &parse_zone(&zone)));
}

#[then(expr = "the title should be {string}")]
fn title_is(world: &mut RelayWorld, expected: String) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert_eq!(notification.title, expected);
}

#[then(expr = "the title should be {int} times {string}")]
fn title_repeated(world: &mut RelayWorld, count: usize, unit: String) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert_eq!(notification.title, unit.repeat(count));
}

#[then(expr = "the title should be at most {int} bytes long")]
fn title_cap(world: &mut RelayWorld, max: usize) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert!(notification.title.len() <= max, "{}", notification.title);
}

#[then(expr = "the body should be {string}")]
fn body_is(world: &mut RelayWorld, expected: String) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert_eq!(notification.body, expected);
}

#[then(expr = "the body should contain {string}")]
fn body_contains(world: &mut RelayWorld, expected: String) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert!(
        notification.body.contains(&expected),
        "Expected body to contain '{}', got '{}'",
        expected,
        notification.body
    );
}

#[then(expr = "the body should have {int} error detail line(s)")]
fn body_detail_lines(world: &mut RelayWorld, expected: usize) {
    let notification = world.notification.as_ref().expect("nothing composed");
    let lines = notification
        .body
        .lines()
        .filter(|l| l.starts_with("- "))
        .count();
    assert_eq!(lines, expected);
}

#[then("the body should have no error header")]
fn body_no_header(world: &mut RelayWorld) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert!(!notification.body.contains("**错误信息:**"));
}

#[then("the body should have an error header")]
fn body_header(world: &mut RelayWorld) {
    let notification = world.notification.as_ref().expect("nothing composed");
    assert_eq!(notification.body.matches("\n\n**错误信息:**").count(), 1);
}

#[then(expr = "the formatted time should be {string}")]
fn formatted_time(world: &mut RelayWorld, expected: String) {
    assert_eq!(world.formatted_time.as_deref(), Some(expected.as_str()));
}
