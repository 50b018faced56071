use std::io::ErrorKind;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::config::MAX_LINE_LENGTH;
use crate::transport::Transport;

/// Newline-delimited transport over a TCP connection.
///
/// Both halves of the stream live here, so dropping the transport closes the connection in both
/// directions at once.
pub struct TcpTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    max_line_length: usize,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_max_line_length(stream, MAX_LINE_LENGTH)
    }

    pub fn with_max_line_length(stream: TcpStream, max_line_length: usize) -> Self {
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer: BufWriter::new(write),
            max_line_length,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == ErrorKind::BrokenPipe || e.kind() == ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await.map_err(write_error)?;
        self.writer.write_all(b"\n").await.map_err(write_error)?;
        self.writer.flush().await.map_err(write_error)?;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        // one byte over the limit tells an overlong line apart from one that just fits
        let limit = self.max_line_length as u64 + 1;
        loop {
            let mut line = String::new();
            let read = (&mut self.reader)
                .take(limit)
                .read_line(&mut line)
                .await
                .map_err(|e| {
                    if e.kind() == ErrorKind::ConnectionReset {
                        anyhow::anyhow!("Connection reset by peer")
                    } else {
                        // callers downcast to io::Error to spot InvalidData
                        anyhow::Error::from(e)
                    }
                })?;
            if read == 0 {
                return Ok(None);
            }
            if read as u64 >= limit && !line.ends_with('\n') {
                return Err(std::io::Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "line too long: more than {} bytes without a newline",
                        self.max_line_length
                    ),
                )
                .into());
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}
