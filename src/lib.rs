pub mod app_config;
pub mod aspects;
pub mod db;
pub mod middleware;
pub mod orm;
pub mod session;
pub mod user;
pub mod web;
