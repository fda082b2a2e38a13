use anyhow::Result;
use sleepmerge_types::{SignalFile, SignalHeader};

/// Binary time-series container codec.
///
/// Implemented outside this workspace. Decoding must not fail on a file whose
/// record count is zero or negative; callers decide how to treat those.
pub trait SignalCodec: Send + Sync {
    /// Decode header and channel table only, without materializing samples.
    fn decode_header(&self, bytes: &[u8]) -> Result<SignalHeader>;

    /// Decode header, every channel's physical samples and annotations.
    fn decode(&self, bytes: &[u8]) -> Result<SignalFile>;

    /// Encode a file (typically a merged session) back to container bytes.
    fn encode(&self, file: &SignalFile) -> Result<Vec<u8>>;
}
