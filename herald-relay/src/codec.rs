use borsh::BorshDeserialize;
use herald_types::constants::{MAX_ENVELOPE_SIZE, MAX_NOTICE_PAYLOAD_SIZE};
use herald_types::error::HeraldError;
use herald_types::notice::{SignedNotice, UnsignedNotice};

use crate::error::RelayError;
use crate::protocol::ENVELOPE_VERSION;

// ─── Payload codec ──────────────────────────────────────────────────────────

/// Encode notice content into the exact bytes a key holder signs.
pub fn encode_payload(notice: &UnsignedNotice) -> Result<Vec<u8>, HeraldError> {
    let data = borsh::to_vec(notice).map_err(|e| HeraldError::SerializationError {
        reason: e.to_string(),
    })?;
    if data.len() > MAX_NOTICE_PAYLOAD_SIZE {
        return Err(HeraldError::PayloadTooLarge {
            size: data.len(),
            max: MAX_NOTICE_PAYLOAD_SIZE,
        });
    }
    Ok(data)
}

/// Decode signed payload bytes into notice content.
///
/// Rejects oversized input, truncation, invalid UTF-8 and trailing bytes. A
/// failed decode never yields a partially populated notice.
pub fn decode_payload(payload: &[u8]) -> Result<UnsignedNotice, HeraldError> {
    if payload.len() > MAX_NOTICE_PAYLOAD_SIZE {
        return Err(HeraldError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_NOTICE_PAYLOAD_SIZE,
        });
    }
    UnsignedNotice::try_from_slice(payload).map_err(|e| HeraldError::DeserializationError {
        reason: e.to_string(),
    })
}

// ─── Envelope codec ─────────────────────────────────────────────────────────

/// Encode a signed notice into a versioned, length-prefixed envelope.
///
/// Wire format: `[4-byte BE length][1-byte version][borsh SignedNotice]`
///
/// The length prefix covers the version byte + body (i.e. `1 + body.len()`).
pub fn encode_envelope(notice: &SignedNotice) -> Result<Vec<u8>, RelayError> {
    let data = borsh::to_vec(notice).map_err(|e| RelayError::CodecError {
        reason: e.to_string(),
    })?;

    if data.len() > MAX_ENVELOPE_SIZE {
        return Err(RelayError::MessageTooLarge {
            size: data.len(),
            max: MAX_ENVELOPE_SIZE,
        });
    }

    let len = ((1 + data.len()) as u32).to_be_bytes();
    let mut out = Vec::with_capacity(4 + 1 + data.len());
    out.extend_from_slice(&len);
    out.push(ENVELOPE_VERSION);
    out.extend_from_slice(&data);
    Ok(out)
}

/// Decode a versioned, length-prefixed envelope into a signed notice.
///
/// Only the envelope is checked here; the payload stays opaque until the
/// notice is authenticated.
pub fn decode_envelope(data: &[u8]) -> Result<SignedNotice, RelayError> {
    if data.len() < 4 {
        return Err(RelayError::CodecError {
            reason: "data too short for length prefix".to_string(),
        });
    }

    let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

    if len > MAX_ENVELOPE_SIZE {
        return Err(RelayError::MessageTooLarge {
            size: len,
            max: MAX_ENVELOPE_SIZE,
        });
    }

    if len < 1 {
        return Err(RelayError::CodecError {
            reason: "message too short: missing envelope version byte".to_string(),
        });
    }

    if data.len() < 4 + len {
        return Err(RelayError::CodecError {
            reason: format!(
                "data too short: expected {} bytes, got {}",
                4 + len,
                data.len()
            ),
        });
    }

    let version = data[4];
    if version != ENVELOPE_VERSION {
        return Err(RelayError::VersionMismatch {
            peer: version,
            ours: ENVELOPE_VERSION,
        });
    }

    SignedNotice::try_from_slice(&data[5..4 + len]).map_err(|e| RelayError::CodecError {
        reason: e.to_string(),
    })
}
