//! Conver: convert Word documents between formats by driving the platform's
//! word-processing automation through a JSON command/response protocol.
//!
//! The actual conversion is performed by an external automation script (JXA
//! on macOS, `PowerShell` on Windows) that drives the installed word processor.
//! This crate builds normalized requests, spawns the script, captures its
//! output, and maps the structured response onto a typed error taxonomy. In
//! batch mode one application session is reused across sequential requests.

#![forbid(unsafe_code)]
// Library documentation is in progress. Public API types have docs;
// internal types will be documented in future releases.
#![allow(missing_docs)]

pub mod backend;
pub mod convert;
pub mod driver;
pub mod error;
pub mod interpret;
pub mod model;
pub mod session;

pub use crate::convert::{
    convert, convert_batch, convert_batch_with_driver, convert_with_driver,
};
pub use crate::error::{ConvertError, FormatSide};
pub use crate::model::*;
