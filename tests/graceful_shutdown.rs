// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{Router, routing::get};
use go_cloud::{
    AppError, AppState, Config, DrainOutcome, ShutdownController, bind, create_router, run,
    serve, shutdown_channel,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Service router plus a `/slow` route that signals `started` and then
/// sleeps for `delay`.
fn app_with_slow_route(delay: Duration, started: Arc<Notify>) -> Router {
    let state = Arc::new(AppState::new(Config {
        ready: true,
        ..Config::default()
    }));
    let slow = Router::new().route(
        "/slow",
        get(move || {
            let started = started.clone();
            async move {
                started.notify_one();
                tokio::time::sleep(delay).await;
                "done"
            }
        }),
    );
    create_router(state).merge(slow)
}

async fn start(
    app: Router,
    grace: Duration,
) -> (SocketAddr, ShutdownController, JoinHandle<DrainOutcome>) {
    let listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (controller, signal) = shutdown_channel();
    let handle = tokio::spawn(serve(listener, app, signal.wait(), grace));
    (addr, controller, handle)
}

#[tokio::test]
async fn serves_requests_until_shutdown() {
    let started = Arc::new(Notify::new());
    let (addr, controller, handle) =
        start(app_with_slow_route(Duration::ZERO, started), Duration::from_secs(5)).await;

    let resp = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    controller.shutdown();
    let outcome = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("idle server should stop promptly")
        .unwrap();
    assert_eq!(outcome, DrainOutcome::Graceful);
}

#[tokio::test]
async fn in_flight_request_completes_within_grace_period() {
    let started = Arc::new(Notify::new());
    let (addr, controller, handle) = start(
        app_with_slow_route(Duration::from_millis(300), started.clone()),
        Duration::from_secs(5),
    )
    .await;

    let in_flight = tokio::spawn(async move {
        let resp = reqwest::get(format!("http://{addr}/slow")).await?;
        let status = resp.status();
        resp.text().await.map(|body| (status, body))
    });

    started.notified().await;
    controller.shutdown();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Listener is closed: new connections are refused.
    let late = reqwest::Client::new()
        .get(format!("http://{addr}/healthz"))
        .send()
        .await;
    assert!(late.is_err(), "new connection accepted after shutdown");

    let (status, body) = in_flight.await.unwrap().unwrap();
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "done");

    assert_eq!(handle.await.unwrap(), DrainOutcome::Graceful);
}

#[tokio::test]
async fn request_outliving_grace_period_is_aborted() {
    let started = Arc::new(Notify::new());
    let (addr, controller, handle) = start(
        app_with_slow_route(Duration::from_secs(30), started.clone()),
        Duration::from_millis(200),
    )
    .await;

    let in_flight = tokio::spawn(async move {
        reqwest::get(format!("http://{addr}/slow"))
            .await?
            .text()
            .await
    });

    started.notified().await;
    controller.shutdown();

    let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("drain must be bounded by the grace period")
        .unwrap();
    assert!(
        matches!(outcome, DrainOutcome::Forced { abandoned } if abandoned >= 1),
        "unexpected outcome: {outcome:?}"
    );

    let result = tokio::time::timeout(Duration::from_secs(5), in_flight)
        .await
        .expect("client should observe the closed connection")
        .unwrap();
    assert!(result.is_err(), "aborted request must not succeed");
}

#[tokio::test]
async fn bind_fails_when_address_is_taken() {
    let held = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = held.local_addr().unwrap();

    let err = bind(addr).await.unwrap_err();
    assert!(matches!(err, AppError::Io(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn run_returns_error_when_port_is_taken() {
    let held = bind("0.0.0.0:0".parse().unwrap()).await.unwrap();
    let config = Config {
        port: held.local_addr().unwrap().port(),
        ..Config::default()
    };

    let result = tokio::time::timeout(Duration::from_secs(2), run(config))
        .await
        .expect("startup failure must not start serving");
    assert!(matches!(result, Err(AppError::Io(_))));
}
