//! Notice authentication, storage and peer relay for the Herald protocol.
//!
//! Incoming notices flow through the [`processor::NoticeProcessor`]
//! (authenticate, decode, validate, sweep + store) into a shared
//! [`store::NoticeStore`]. The [`relay::NoticeRelay`] decides, per peer
//! session, which stored notices to push, offering each at most once.

pub mod auth;
pub mod builder;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod notice;
pub mod peer_manager;
pub mod processor;
pub mod protocol;
pub mod relay;
pub mod sink;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
