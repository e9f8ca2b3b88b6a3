use nom::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DhexError {
    #[error("Declared length exceeds available bytes")]
    Truncated,

    #[error("Extension record lengths do not add up")]
    LengthMismatch,

    #[error("Malformed certificate type extension payload")]
    MalformedCertificateType,

    #[error("Too big length field (> 65_535) {0}")]
    TooBigLength(usize),
}

impl DhexError {
    /// Map a nom error from the parsing layer to the typed error surface.
    ///
    /// The parsers signal length bookkeeping violations as
    /// `ErrorKind::LengthValue` and certificate type shape violations as
    /// `ErrorKind::Verify`; a plain `Eof` means the input buffer itself
    /// ran out.
    pub(crate) fn from_parse(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => DhexError::Truncated,
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                ErrorKind::Eof => DhexError::Truncated,
                ErrorKind::Verify => DhexError::MalformedCertificateType,
                _ => DhexError::LengthMismatch,
            },
        }
    }
}
