//! # Hireboard API Library
//!
//! Transformation layer between request payloads and the stores in
//! `hireboard-shared`: validation, write/read shapes, transactional
//! account + profile creation and credential verification.
//!
//! ## Modules
//!
//! - `config`: Configuration management
//! - `error`: Error taxonomy and HTTP response mapping
//! - `serializers`: Wire shapes and the operations behind them

pub mod config;
pub mod error;
pub mod serializers;
