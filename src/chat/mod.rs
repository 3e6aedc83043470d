//! Document-grounded chat.

mod service;

pub use service::{grounding_prompt, ChatService};
