//! HTTP API: routing, request/response mapping, and failure dispatch.

pub mod app;
pub mod dto;
pub mod problem;
