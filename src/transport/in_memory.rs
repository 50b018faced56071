use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::yield_now;

use crate::transport::Transport;

/// One direction of the pipe.
#[derive(Default)]
struct Pipe {
    lines: Mutex<VecDeque<String>>,
    closed: AtomicBool,
}

impl Pipe {
    fn lines(&self) -> anyhow::Result<MutexGuard<'_, VecDeque<String>>> {
        self.lines
            .lock()
            .map_err(|_| anyhow::anyhow!("In-memory pipe poisoned"))
    }
}

/// One end of an in-process line pipe. Lines sent on one end arrive on the other in order.
pub struct InMemoryTransport {
    incoming: Arc<Pipe>,
    outgoing: Arc<Pipe>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let a = Arc::new(Pipe::default());
        let b = Arc::new(Pipe::default());
        (
            Self {
                incoming: a.clone(),
                outgoing: b.clone(),
            },
            Self {
                incoming: b,
                outgoing: a,
            },
        )
    }

    /// Stop sending. The peer still reads what was already sent, then sees end of stream.
    /// Lines coming the other way keep arriving.
    pub fn shutdown(&self) {
        self.outgoing.closed.store(true, Ordering::SeqCst);
    }

    fn peer_gone(pipe: &Arc<Pipe>) -> bool {
        Arc::strong_count(pipe) == 1
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        if self.outgoing.closed.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Channel shut down"));
        }
        if Self::peer_gone(&self.outgoing) {
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        self.outgoing.lines()?.push_back(line.to_string());
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            let next = self.incoming.lines()?.pop_front();
            if let Some(line) = next {
                return Ok(Some(line));
            }
            if self.incoming.closed.load(Ordering::SeqCst) || Self::peer_gone(&self.incoming) {
                return Ok(None);
            }
            yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lines_arrive_in_order_then_eof() -> anyhow::Result<()> {
        let (mut a, mut b) = InMemoryTransport::pair();
        a.send("one").await?;
        a.send("two").await?;
        a.shutdown();
        assert!(a.send("three").await.is_err());
        assert_eq!(b.recv().await?.as_deref(), Some("one"));
        assert_eq!(b.recv().await?.as_deref(), Some("two"));
        assert_eq!(b.recv().await?, None);

        // the other direction is still open
        b.send("back").await?;
        assert_eq!(a.recv().await?.as_deref(), Some("back"));
        Ok(())
    }

    #[tokio::test]
    async fn dropped_peer_reads_as_eof() -> anyhow::Result<()> {
        let (mut a, b) = InMemoryTransport::pair();
        drop(b);
        assert_eq!(a.recv().await?, None);
        assert!(a.send("hello").await.is_err());
        Ok(())
    }
}
