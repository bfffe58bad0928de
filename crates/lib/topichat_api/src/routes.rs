//! Route paths served by [`crate::router`].

pub const GET_INDEX: &str = "/";
pub const GET_STATIC_SCRIPT: &str = "/static/script.js";
pub const POST_CHAT: &str = "/chat";
