//! BDD step definitions for the forwarding feature

use std::sync::Arc;

use cucumber::given;

use crate::steps::webhook_steps::RecordingHttpClient;
use crate::world::RelayWorld;

#[given(expr = "the ServerChan API replies with status {int} and body {string}")]
fn serverchan_replies(world: &mut RelayWorld, status: u16, body: String) {
    world.downstream = Some(Arc::new(RecordingHttpClient::replying(status, &body)));
}

#[given("the ServerChan API is unreachable")]
fn serverchan_unreachable(world: &mut RelayWorld) {
    world.downstream = Some(Arc::new(RecordingHttpClient::unreachable()));
}
