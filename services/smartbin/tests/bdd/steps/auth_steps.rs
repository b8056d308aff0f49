//! BDD step definitions for the auth gate

use std::sync::Arc;

use cucumber::{given, then, when};
use sw_auth::{AuthGate, StaticCredentials};

use crate::world::SmartbinWorld;

fn gate(world: &SmartbinWorld) -> &AuthGate {
    world.gate.as_ref().expect("auth gate not set")
}

#[given(expr = "an auth gate for {string} with password {string}")]
fn auth_gate(world: &mut SmartbinWorld, username: String, password: String) {
    world.gate = Some(AuthGate::new(Arc::new(StaticCredentials::new(
        username, password,
    ))));
}

#[when(expr = "{string} logs in with password {string}")]
async fn log_in(world: &mut SmartbinWorld, username: String, password: String) {
    let result = gate(world).login(&username, &password).await;
    world.login_result = Some(result);
}

#[when("the user logs out")]
async fn log_out(world: &mut SmartbinWorld) {
    let token = match world.login_result.as_ref().expect("no login attempted") {
        Ok(session) => session.token.clone(),
        Err(e) => panic!("cannot log out after failed login: {e}"),
    };
    assert!(gate(world).logout(&token).await);
}

#[then(expr = "the login should succeed for {string}")]
fn login_succeeded(world: &mut SmartbinWorld, username: String) {
    match world.login_result.as_ref().expect("no login attempted") {
        Ok(session) => {
            assert_eq!(session.username, username);
            assert!(!session.token.is_empty());
        }
        Err(e) => panic!("expected success, got {e}"),
    }
}

#[then(expr = "the login should fail with {string}")]
fn login_failed(world: &mut SmartbinWorld, message: String) {
    match world.login_result.as_ref().expect("no login attempted") {
        Ok(session) => panic!("expected failure, got session for {}", session.username),
        Err(e) => assert_eq!(e.to_string(), message),
    }
}

#[then(expr = "there should be {int} open session(s)")]
async fn open_sessions(world: &mut SmartbinWorld, expected: usize) {
    assert_eq!(gate(world).sessions().len().await, expected);
}
