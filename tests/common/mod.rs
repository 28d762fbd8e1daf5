#![allow(dead_code)]

use std::net::SocketAddr;
use std::str::FromStr;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::{App, Error};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use staff_hub::config::Config;
use staff_hub::{db, error, routes};

/// Fresh in-memory database with the full schema. One connection keeps
/// every query on the same memory instance.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    db::init_schema(&pool).await.unwrap();

    pool
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 900,
        refresh_token_ttl: 604_800,
        rate_login_per_min: 10_000,
        rate_signup_per_min: 10_000,
        rate_refresh_per_min: 10_000,
        rate_protected_per_min: 60_000,
        seed_demo: false,
    }
}

/// Full application as served in production, minus the transport.
pub fn test_app(
    pool: SqlitePool,
    config: Config,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(Data::new(pool))
        .app_data(Data::new(config.clone()))
        .app_data(error::json_config())
        .app_data(error::query_config())
        .configure(move |cfg| routes::configure(cfg, config.clone()))
}

// The rate limiter keys on peer IP, so every test request carries one.
fn peer() -> SocketAddr {
    "127.0.0.1:34567".parse().unwrap()
}

pub fn get(path: &str) -> TestRequest {
    TestRequest::get().uri(path).peer_addr(peer())
}

pub fn post(path: &str) -> TestRequest {
    TestRequest::post().uri(path).peer_addr(peer())
}

pub fn put(path: &str) -> TestRequest {
    TestRequest::put().uri(path).peer_addr(peer())
}

pub fn patch(path: &str) -> TestRequest {
    TestRequest::patch().uri(path).peer_addr(peer())
}

pub fn delete(path: &str) -> TestRequest {
    TestRequest::delete().uri(path).peer_addr(peer())
}

pub fn bearer(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}
