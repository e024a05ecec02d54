//! # vidchain-client
//!
//! Typed client for the VidChain backend canister.
//!
//! [`VidChainClient`] exposes one async method per backend capability and
//! settles every outcome into [`Result<T, ClientError>`](ClientError). It
//! talks to the canister through an [`ActorBinding`], injected at
//! construction; [`GatewayBinding`] is the HTTP implementation.

pub mod binding;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod upload;

pub use binding::ActorBinding;
pub use client::VidChainClient;
pub use config::ClientConfig;
pub use error::{ClientError, TransportError, UploadError};
pub use gateway::GatewayBinding;
pub use upload::UploadDraft;
