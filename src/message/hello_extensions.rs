use log::trace;
use nom::bytes::complete::take;
use nom::error::{Error, ErrorKind};
use nom::number::complete::be_u16;
use nom::{Err, IResult};

use crate::error::DhexError;

use super::extension::{ExtensionType, UnknownExtension};
use super::extensions::certificate_type::CertificateTypeExtension;

/// Which hello message a block of extensions belongs to.
///
/// Certificate type extensions are a preference list in a ClientHello and
/// a single negotiated value in a ServerHello. The payload alone cannot
/// tell the two apart, so the handshake layer supplies this context when
/// decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelloSide {
    ClientHello,
    ServerHello,
}

impl HelloSide {
    fn list_mode(&self) -> bool {
        matches!(self, HelloSide::ClientHello)
    }
}

/// A single extension record attached to a hello message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelloExtension {
    ClientCertificateType(CertificateTypeExtension),
    ServerCertificateType(CertificateTypeExtension),
    Unknown(UnknownExtension),
}

impl HelloExtension {
    pub fn extension_type(&self) -> ExtensionType {
        match self {
            HelloExtension::ClientCertificateType(_) => ExtensionType::ClientCertificateType,
            HelloExtension::ServerCertificateType(_) => ExtensionType::ServerCertificateType,
            HelloExtension::Unknown(ext) => ExtensionType::Unknown(ext.extension_type),
        }
    }

    /// The raw 16-bit type code as it appears on the wire.
    pub fn type_code(&self) -> u16 {
        match self {
            HelloExtension::Unknown(ext) => ext.extension_type,
            other => other.extension_type().as_u16(),
        }
    }

    fn payload_length(&self) -> usize {
        match self {
            HelloExtension::ClientCertificateType(ext)
            | HelloExtension::ServerCertificateType(ext) => ext.payload_length(),
            HelloExtension::Unknown(ext) => ext.payload.len(),
        }
    }

    pub fn parse(input: &[u8], side: HelloSide) -> IResult<&[u8], HelloExtension> {
        let (input, extension_type) = ExtensionType::parse(input)?;
        let (input, payload_length) = be_u16(input)?;
        let (input, payload) = take(payload_length)(input)?;

        let extension = match extension_type {
            ExtensionType::ClientCertificateType => {
                let (_, ext) = CertificateTypeExtension::parse(payload, side.list_mode())?;
                HelloExtension::ClientCertificateType(ext)
            }
            ExtensionType::ServerCertificateType => {
                let (_, ext) = CertificateTypeExtension::parse(payload, side.list_mode())?;
                HelloExtension::ServerCertificateType(ext)
            }
            ExtensionType::Unknown(code) => {
                trace!("Carrying unknown hello extension type 0x{:04x} opaquely", code);
                HelloExtension::Unknown(UnknownExtension::new(code, payload.to_vec()))
            }
        };

        Ok((input, extension))
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        let payload_length = self.payload_length();
        // The wire length field is 16 bits.
        assert!(
            payload_length <= u16::MAX as usize,
            "extension payload too long: {}",
            payload_length
        );

        output.extend_from_slice(&self.type_code().to_be_bytes());
        output.extend_from_slice(&(payload_length as u16).to_be_bytes());
        match self {
            HelloExtension::ClientCertificateType(ext)
            | HelloExtension::ServerCertificateType(ext) => ext.serialize(output),
            HelloExtension::Unknown(ext) => output.extend_from_slice(&ext.payload),
        }
    }
}

/// The extensions block of a hello message: a 16-bit total length followed
/// by zero or more extension records.
///
/// The sequence keeps wire order; some peers interpret extension
/// precedence by position, so order must survive a round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelloExtensions {
    extensions: Vec<HelloExtension>,
}

impl HelloExtensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder append (outbound path).
    pub fn add(&mut self, extension: HelloExtension) {
        self.extensions.push(extension);
    }

    /// First decoded extension of the given type, in wire order.
    ///
    /// Unknown extensions are carried for byte-identical re-serialization
    /// but are not addressable through the typed lookup.
    pub fn find_by_type(&self, extension_type: ExtensionType) -> Option<&HelloExtension> {
        self.extensions.iter().find(|ext| {
            !matches!(ext, HelloExtension::Unknown(_)) && ext.extension_type() == extension_type
        })
    }

    pub fn extensions(&self) -> &[HelloExtension] {
        &self.extensions
    }

    pub fn iter(&self) -> impl Iterator<Item = &HelloExtension> {
        self.extensions.iter()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn parse(input: &[u8], side: HelloSide) -> IResult<&[u8], HelloExtensions> {
        let (input, block_length) = be_u16(input)?;
        let (input, block) = take(block_length)(input)?;

        let mut extensions = Vec::new();
        let mut rest = block;
        while !rest.is_empty() {
            let (r, extension) = HelloExtension::parse(rest, side).map_err(eof_to_length_mismatch)?;
            extensions.push(extension);
            rest = r;
        }

        Ok((input, HelloExtensions { extensions }))
    }

    /// Decode a complete extensions block with a typed error surface.
    ///
    /// The whole input must be consumed; trailing bytes after the declared
    /// block are a length mismatch.
    pub fn decode(input: &[u8], side: HelloSide) -> Result<HelloExtensions, DhexError> {
        match Self::parse(input, side) {
            Ok((rest, extensions)) => {
                if !rest.is_empty() {
                    return Err(DhexError::LengthMismatch);
                }
                Ok(extensions)
            }
            Err(err) => Err(DhexError::from_parse(err)),
        }
    }

    /// Serialize the block: each extension in sequence order, prefixed
    /// with the 16-bit total length.
    pub fn encode(&self, output: &mut Vec<u8>) -> Result<(), DhexError> {
        // Type (2) + length (2) + payload per record.
        let block_length: usize = self
            .extensions
            .iter()
            .map(|extension| 4 + extension.payload_length())
            .sum();

        if block_length > u16::MAX as usize {
            return Err(DhexError::TooBigLength(block_length));
        }

        output.extend_from_slice(&(block_length as u16).to_be_bytes());
        output.reserve(block_length);
        for extension in &self.extensions {
            extension.serialize(output);
        }
        Ok(())
    }
}

/// A record overrunning the sliced block means the inner lengths do not
/// add up to the declared outer length. The outer buffer already held all
/// its declared bytes, so this is a length mismatch, not a truncation.
fn eof_to_length_mismatch(err: Err<Error<&[u8]>>) -> Err<Error<&[u8]>> {
    match err {
        Err::Error(e) if e.code == ErrorKind::Eof => {
            Err::Failure(Error::new(e.input, ErrorKind::LengthValue))
        }
        other => other,
    }
}
