use nom::{number::complete::be_u16, IResult};

/// Hello extension type codes, IANA TLS ExtensionType registry.
///
/// Only the certificate type extensions get decoded further; every other
/// code classifies as `Unknown` and its payload is carried opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionType {
    ClientCertificateType,
    ServerCertificateType,
    Unknown(u16),
}

impl ExtensionType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0013 => ExtensionType::ClientCertificateType,
            0x0014 => ExtensionType::ServerCertificateType,
            _ => ExtensionType::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            ExtensionType::ClientCertificateType => 0x0013,
            ExtensionType::ServerCertificateType => 0x0014,
            ExtensionType::Unknown(value) => *value,
        }
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], ExtensionType> {
        let (input, value) = be_u16(input)?;
        Ok((input, ExtensionType::from_u16(value)))
    }
}

/// An extension whose type code is not in the registry.
///
/// The payload is stored exactly as read so the extension re-serializes
/// byte-identical. Its declared length is trusted for skipping but the
/// payload is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExtension {
    pub extension_type: u16,
    pub payload: Vec<u8>,
}

impl UnknownExtension {
    pub fn new(extension_type: u16, payload: Vec<u8>) -> Self {
        UnknownExtension {
            extension_type,
            payload,
        }
    }
}
