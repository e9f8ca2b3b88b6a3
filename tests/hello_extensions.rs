//! End-to-end tests for the hello extensions block against hand-built
//! wire buffers.

use dhex::{
    CertificateType, CertificateTypeExtension, DhexError, ExtensionType, HelloExtension,
    HelloExtensions, HelloSide, UnknownExtension,
};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build one raw extension record: type, length, payload.
fn raw_extension(type_code: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&type_code.to_be_bytes());
    out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Build a whole extensions block from raw records.
fn raw_block(records: &[Vec<u8>]) -> Vec<u8> {
    let total: usize = records.iter().map(|r| r.len()).sum();
    let mut out = Vec::new();
    out.extend_from_slice(&(total as u16).to_be_bytes());
    for record in records {
        out.extend_from_slice(record);
    }
    out
}

#[test]
fn serialize_then_deserialize_preserves_certificate_types() {
    init_log();

    let mut ext = CertificateTypeExtension::new_list();
    ext.add_certificate_type(CertificateType::X509);
    ext.add_certificate_type(CertificateType::RawPublicKey);

    let mut extensions = HelloExtensions::new();
    extensions.add(HelloExtension::ClientCertificateType(ext));

    let mut serialized = Vec::new();
    extensions.encode(&mut serialized).unwrap();

    let deserialized = HelloExtensions::decode(&serialized, HelloSide::ClientHello).unwrap();
    let Some(HelloExtension::ClientCertificateType(cert_type_ext)) =
        deserialized.find_by_type(ExtensionType::ClientCertificateType)
    else {
        panic!("client certificate type extension missing");
    };

    assert_eq!(cert_type_ext.certificate_types().len(), 2);
    assert_eq!(
        cert_type_ext.certificate_types(),
        &[CertificateType::X509, CertificateType::RawPublicKey]
    );
    assert_eq!(deserialized, extensions);
}

#[test]
fn decoding_ignores_unknown_extension_types() {
    init_log();

    // Extension type 0x50 is not defined by IANA.
    let unknown_type_code = 0x50;

    let block = raw_block(&[
        // a supported client certificate type extension
        raw_extension(0x0013, &[0x01, CertificateType::X509.as_u8()]),
        // the unknown one, with an arbitrary payload
        raw_extension(unknown_type_code, &[0x12]),
        // a supported server certificate type extension
        raw_extension(0x0014, &[0x01, CertificateType::X509.as_u8()]),
    ]);

    let decoded = HelloExtensions::decode(&block, HelloSide::ClientHello).unwrap();

    assert!(decoded
        .find_by_type(ExtensionType::ClientCertificateType)
        .is_some());
    assert!(decoded
        .find_by_type(ExtensionType::ServerCertificateType)
        .is_some());
    assert!(decoded
        .find_by_type(ExtensionType::Unknown(unknown_type_code))
        .is_none());

    // The unknown record is still carried in wire order and the whole
    // block re-encodes byte-identical.
    assert_eq!(decoded.len(), 3);
    let mut reencoded = Vec::new();
    decoded.encode(&mut reencoded).unwrap();
    assert_eq!(reencoded, block);
}

#[test]
fn roundtrip_with_known_kinds_only() {
    init_log();

    let mut client_ext = CertificateTypeExtension::new_list();
    client_ext.add_certificate_type(CertificateType::RawPublicKey);
    client_ext.add_certificate_type(CertificateType::X509);

    let mut server_ext = CertificateTypeExtension::new_list();
    server_ext.add_certificate_type(CertificateType::RawPublicKey);

    let mut extensions = HelloExtensions::new();
    extensions.add(HelloExtension::ClientCertificateType(client_ext));
    extensions.add(HelloExtension::ServerCertificateType(server_ext));

    let mut serialized = Vec::new();
    extensions.encode(&mut serialized).unwrap();

    let decoded = HelloExtensions::decode(&serialized, HelloSide::ClientHello).unwrap();
    assert_eq!(decoded, extensions);
}

#[test]
fn declared_length_beyond_buffer_is_truncated() {
    init_log();

    let mut block = raw_block(&[raw_extension(0x0013, &[0x01, 0x00])]);
    // Bump the outer length beyond what the buffer holds.
    block[1] += 1;

    let result = HelloExtensions::decode(&block, HelloSide::ClientHello);
    assert_eq!(result, Err(DhexError::Truncated));
}

#[test]
fn inner_record_length_mismatch_is_rejected() {
    init_log();

    let mut block = raw_block(&[raw_extension(0x50, &[0x12, 0x34])]);
    // Shrink the record's declared payload length; the block now ends
    // mid-record.
    block[5] = 0x01;

    let result = HelloExtensions::decode(&block, HelloSide::ClientHello);
    assert_eq!(result, Err(DhexError::LengthMismatch));
}

#[test]
fn unknown_extension_reserializes_byte_identical() {
    init_log();

    let payload = vec![0xDE, 0xAD, 0xBE, 0xEF];
    let mut extensions = HelloExtensions::new();
    extensions.add(HelloExtension::Unknown(UnknownExtension::new(
        0x1234,
        payload.clone(),
    )));

    let mut serialized = Vec::new();
    extensions.encode(&mut serialized).unwrap();
    assert_eq!(
        serialized,
        [0x00, 0x08, 0x12, 0x34, 0x00, 0x04, 0xDE, 0xAD, 0xBE, 0xEF]
    );

    let decoded = HelloExtensions::decode(&serialized, HelloSide::ClientHello).unwrap();
    assert_eq!(decoded, extensions);
}
