//! 商品目录后端：身份与会话子系统
//! 账户注册、登录、登出，以及与服务端会话绑定的令牌校验

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
