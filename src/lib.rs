//! gitscope is the domain model behind a lightweight self-hosted git
//! repository browser.
//!
//! The crate wraps libgit2's object database with path-aware repository,
//! commit, tree, blob, diff, and blame entities; authenticates remote
//! administration requests with detached ed25519 signatures over canonical
//! JSON; and lays out the all-refs commit history as a 2D lane graph for
//! rendering.
//!
//! HTTP routing, template rendering, and the highlighting service itself are
//! deliberately not part of this crate. A transport layer is expected to call
//! in through [`registry::Registry`], the read operations on [`repo::Repo`],
//! and the administrative operations in [`admin`].

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod keyring;
pub mod paths;
pub mod registry;
pub mod repo;
pub mod user;

pub use error::{Error, Result};
