/// Notice envelope wire version. The first byte after the 4-byte length prefix.
/// Bump this whenever the borsh layout of `SignedNotice` changes.
pub const ENVELOPE_VERSION: u8 = 1;
