pub mod auth;
pub mod blacklist;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
