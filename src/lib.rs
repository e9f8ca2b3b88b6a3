//! Wire codec for the DTLS "Hello Extensions" block.
//!
//! The extensions block is the length-prefixed, type-tagged sequence of
//! optional metadata items attached to ClientHello/ServerHello messages.
//! This crate decodes untrusted network bytes into typed values and
//! serializes typed values back into the exact wire layout. Unknown
//! extension types are carried opaquely rather than rejected, and all
//! length bookkeeping is enforced strictly without ever reading past the
//! input buffer.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod error;
pub use error::DhexError;

pub mod message;
pub use message::{
    CertificateType, CertificateTypeExtension, ExtensionType, HelloExtension, HelloExtensions,
    HelloSide, UnknownExtension,
};
