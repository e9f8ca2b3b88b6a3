use arrayvec::ArrayVec;
use nom::error::{Error, ErrorKind};
use nom::number::complete::be_u8;
use nom::{Err, IResult};

use crate::error::DhexError;

/// Certificate type codes carried by the client/server certificate type
/// extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateType {
    X509,
    RawPublicKey,
    Unsupported(u8),
}

impl CertificateType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => CertificateType::X509,
            0x01 => CertificateType::RawPublicKey,
            _ => CertificateType::Unsupported(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            CertificateType::X509 => 0x00,
            CertificateType::RawPublicKey => 0x01,
            CertificateType::Unsupported(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], CertificateType> {
        let (input, value) = be_u8(input)?;
        Ok((input, CertificateType::from_u8(value)))
    }
}

/// Certificate type extension payload.
///
/// The client and server certificate type extensions share this wire
/// shape. In list mode the sender offers several acceptable types: a count
/// byte followed by one code byte per type. In single-value mode the
/// sender commits to one negotiated type: exactly one code byte, no count.
/// A one-byte payload is ambiguous between the two, so which mode applies
/// comes from the containing hello message, never from the payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateTypeExtension {
    certificate_types: ArrayVec<CertificateType, 255>,
    list_mode: bool,
}

impl CertificateTypeExtension {
    /// Create an empty preference list (outbound, client side).
    pub fn new_list() -> Self {
        CertificateTypeExtension {
            certificate_types: ArrayVec::new(),
            list_mode: true,
        }
    }

    /// Create a single negotiated value (outbound, server side).
    pub fn new_single(certificate_type: CertificateType) -> Self {
        let mut certificate_types = ArrayVec::new();
        certificate_types.push(certificate_type);
        CertificateTypeExtension {
            certificate_types,
            list_mode: false,
        }
    }

    /// Builder append. Duplicates are legal on the wire, so none are
    /// rejected here. The list is bounded by the wire's one-byte count;
    /// appends past 255 entries are dropped.
    pub fn add_certificate_type(&mut self, certificate_type: CertificateType) {
        let _ = self.certificate_types.try_push(certificate_type);
    }

    pub fn certificate_types(&self) -> &[CertificateType] {
        &self.certificate_types
    }

    pub fn is_list_mode(&self) -> bool {
        self.list_mode
    }

    pub fn parse(input: &[u8], list_mode: bool) -> IResult<&[u8], CertificateTypeExtension> {
        if list_mode {
            if input.is_empty() {
                return Err(Err::Failure(Error::new(input, ErrorKind::Verify)));
            }
            let (rest, count) = be_u8(input)?;
            // The count must account for the whole remaining payload.
            if rest.len() != count as usize {
                return Err(Err::Failure(Error::new(rest, ErrorKind::Verify)));
            }

            let mut certificate_types = ArrayVec::new();
            let mut rest = rest;
            for _ in 0..count {
                let (r, certificate_type) = CertificateType::parse(rest)?;
                certificate_types.push(certificate_type);
                rest = r;
            }

            Ok((
                rest,
                CertificateTypeExtension {
                    certificate_types,
                    list_mode: true,
                },
            ))
        } else {
            if input.len() != 1 {
                return Err(Err::Failure(Error::new(input, ErrorKind::Verify)));
            }
            let (rest, certificate_type) = CertificateType::parse(input)?;

            let mut certificate_types = ArrayVec::new();
            certificate_types.push(certificate_type);

            Ok((
                rest,
                CertificateTypeExtension {
                    certificate_types,
                    list_mode: false,
                },
            ))
        }
    }

    /// Decode one extension payload with a typed error surface.
    pub fn decode(payload: &[u8], list_mode: bool) -> Result<CertificateTypeExtension, DhexError> {
        match Self::parse(payload, list_mode) {
            Ok((_, extension)) => Ok(extension),
            Err(err) => Err(DhexError::from_parse(err)),
        }
    }

    pub fn serialize(&self, output: &mut Vec<u8>) {
        if self.list_mode {
            output.push(self.certificate_types.len() as u8);
        }
        for certificate_type in &self.certificate_types {
            output.push(certificate_type.as_u8());
        }
    }

    pub(crate) fn payload_length(&self) -> usize {
        if self.list_mode {
            1 + self.certificate_types.len()
        } else {
            self.certificate_types.len()
        }
    }
}
