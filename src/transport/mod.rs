//! Line-oriented transports carrying one JSON envelope per line.

/// A bidirectional stream of text lines.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write `line` followed by a newline and flush it.
    async fn send(&mut self, line: &str) -> anyhow::Result<()>;

    /// Wait for the next non-blank line. `Ok(None)` means the peer closed the stream.
    ///
    /// A line that is not valid UTF-8 or exceeds the length limit is reported as a
    /// `std::io::Error` of kind `InvalidData`.
    async fn recv(&mut self) -> anyhow::Result<Option<String>>;
}

pub mod in_memory;
pub mod tcp;
