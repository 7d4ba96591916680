//! Error types for the Huffman codec.

/// Failure while encoding or decoding a container.
///
/// Every variant is a validation failure on fully-buffered input. None of
/// them is retryable without a corrected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanError {
    /// Padding count and data bytes of a packed payload disagree.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The serialized tree is not a valid Huffman tree.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// The container is shorter than its own framing declares.
    #[error("truncated container: {0}")]
    TruncatedContainer(String),

    /// The bit stream ended before the last symbol was complete.
    #[error("decode underflow: {0}")]
    DecodeUnderflow(String),
}

impl HuffmanError {
    pub(crate) fn payload(msg: impl Into<String>) -> Self {
        HuffmanError::MalformedPayload(msg.into())
    }

    pub(crate) fn tree(msg: impl Into<String>) -> Self {
        HuffmanError::MalformedTree(msg.into())
    }

    pub(crate) fn truncated(msg: impl Into<String>) -> Self {
        HuffmanError::TruncatedContainer(msg.into())
    }

    pub(crate) fn underflow(msg: impl Into<String>) -> Self {
        HuffmanError::DecodeUnderflow(msg.into())
    }

    /// Returns true for the kinds caused by input cut short.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            HuffmanError::TruncatedContainer(_) | HuffmanError::DecodeUnderflow(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            HuffmanError::payload("padding 9 exceeds 7").to_string(),
            "malformed payload: padding 9 exceeds 7"
        );
        assert_eq!(
            HuffmanError::tree("leaf has children").to_string(),
            "malformed tree: leaf has children"
        );
        assert_eq!(
            HuffmanError::truncated("need 4 bytes").to_string(),
            "truncated container: need 4 bytes"
        );
        assert_eq!(
            HuffmanError::underflow("ended mid-symbol").to_string(),
            "decode underflow: ended mid-symbol"
        );
    }

    #[test]
    fn test_is_truncation() {
        assert!(HuffmanError::truncated("x").is_truncation());
        assert!(HuffmanError::underflow("x").is_truncation());
        assert!(!HuffmanError::payload("x").is_truncation());
        assert!(!HuffmanError::tree("x").is_truncation());
    }
}
