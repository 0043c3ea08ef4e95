//! Buffer Sizes and Memory Constraints
//!
//! Every string the engine produces lives in a fixed-capacity buffer. These
//! capacities are the hard caps the wire formats are truncated to.

/// Maximum pub/sub package size (bytes).
///
/// Shadow documents are serialized into a buffer of this size; anything
/// longer is cut at the last whole UTF-8 character.
///
/// Source: MQTT client default packet buffer on ESP8266-class boards
pub const MAX_PACKAGE_SIZE: usize = 512;

/// Maximum length of a composed report (bytes).
///
/// One SMS segment. Includes the caller supplied intro.
pub const REPORT_MAX_LEN: usize = 160;

/// Maximum length of a notification identity (bytes).
///
/// E.164 allows 15 digits; a leading '+' and headroom for short codes.
pub const IDENTITY_MAX_LEN: usize = 20;

/// Maximum length of a pub/sub topic (bytes).
pub const TOPIC_MAX_LEN: usize = 96;
