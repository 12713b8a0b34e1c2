//! Core library for the Clover Pit save editor.
//!
//! A save file is a repeating-key XOR mask over a UTF-8 JSON document. This
//! crate decodes and re-encodes that container ([`codec`]), translates the
//! game's little-endian base-256 counters ([`byte_array`]), and maps the
//! document's well-known paths onto flat, typed editable values
//! ([`fields`]). [`Session`] owns a decoded document; [`Workspace`] adds
//! the file path, save, and backup handling on top.

pub mod byte_array;
pub mod codec;
mod error;
pub mod fields;
mod session;
pub mod value;
mod workspace;

pub use codec::SaveDocument;
pub use error::{CoreError, CoreErrorCode};
pub use session::Session;
pub use workspace::Workspace;
