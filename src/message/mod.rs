//! Typed representation of the hello extensions block and its records.

mod extension;
mod extensions;
mod hello_extensions;

pub use extension::{ExtensionType, UnknownExtension};
pub use extensions::certificate_type::{CertificateType, CertificateTypeExtension};
pub use hello_extensions::{HelloExtension, HelloExtensions, HelloSide};
