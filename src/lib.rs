//! Mahjongg solitaire (workspace facade crate).
//!
//! This package exposes `xmahjongg::{core,adapter,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use xmahjongg_adapter as adapter;
pub use xmahjongg_core as core;
pub use xmahjongg_types as types;
