//! Hivemind smart home client.
//!
//! ARCHITECTURE
//! ============
//! Leaf first: `config` and `session` (token storage) feed the `http`
//! client; `services` implement the `repositories` contracts over it; the
//! `use_cases` and `hooks` layers sit on top for interactive callers, and
//! `actions` serve request-scoped callers that carry their token in a
//! cookie. `suggestions` is independent of the API and talks to an LLM via
//! `llm`.

pub mod actions;
pub mod config;
pub mod domain;
pub mod error;
pub mod hooks;
pub mod http;
pub mod llm;
pub mod repositories;
pub mod services;
pub mod session;
pub mod suggestions;
pub mod use_cases;

#[cfg(test)]
mod test_support;
