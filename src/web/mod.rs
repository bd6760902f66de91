// Web frontend: askama templates rendered by axum handlers, driven by htmx

pub mod handlers;
pub mod view_models;
