use bencode_wire::IntegerPolicy;

/// Default nesting limit. Deep enough for any real document, shallow
/// enough that recursive consumers of the token stream stay off the
/// guard page.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default per-string limit (64 MiB).
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Configuration for a [`Decoder`](crate::Decoder).
///
/// ```text
/// ┌─────────────────────┬──────────┬────────────────────────────────────┐
/// │ Field               │ Default  │ Purpose                            │
/// ├─────────────────────┼──────────┼────────────────────────────────────┤
/// │ integer_policy      │ Strict   │ Leading zero / negative zero rule  │
/// │ max_depth           │ 512      │ Limit on open containers           │
/// │ max_string_len      │ 64 MiB   │ Limit on one length prefix         │
/// │ allow_trailing_data │ false    │ Bytes after the document allowed?  │
/// └─────────────────────┴──────────┴────────────────────────────────────┘
/// ```
///
/// With `allow_trailing_data` set, the decoder stops reading right after
/// the last byte of the top-level value, so several documents can be read
/// back to back from one reader via
/// [`Decoder::into_inner`](crate::Decoder::into_inner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// How `i03e`, `i-0e` and `03:abc` are treated.
    pub integer_policy: IntegerPolicy,

    /// Opening a container at a depth greater than this fails with
    /// [`DecodeError::DepthLimitExceeded`](crate::DecodeError::DepthLimitExceeded).
    pub max_depth: usize,

    /// A length prefix above this fails with
    /// [`DecodeError::StringTooLong`](crate::DecodeError::StringTooLong)
    /// before any payload byte is read.
    pub max_string_len: usize,

    /// Whether bytes may follow the top-level value.
    pub allow_trailing_data: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            integer_policy: IntegerPolicy::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            allow_trailing_data: false,
        }
    }
}

impl DecoderConfig {
    /// Default limits with the lenient integer policy.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            integer_policy: IntegerPolicy::Lenient,
            ..Self::default()
        }
    }
}
