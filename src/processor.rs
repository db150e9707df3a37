use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::ParseError;
use crate::protocol::{Command, Reply};
use crate::store::RecordStore;

/// Longest command line accepted, in bytes, newline included
pub const MAX_LINE_LEN: usize = 4096;

/// Processor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Accepting commands
    Running,
    /// `X` or end of input seen, store not yet released
    Terminating,
    /// Store released; terminal
    Stopped,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines read, blank ones included
    pub lines: usize,
    /// Records released at teardown
    pub released: usize,
}

/// Drives the record store from a line-oriented command stream
pub struct Processor {
    store: RecordStore,
    state: State,
}

impl Processor {
    /// Take ownership of the store and reset it
    pub fn new(mut store: RecordStore) -> Self {
        store.init();
        Self {
            store,
            state: State::Running,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Apply one command line, returning the reply to write, if any.
    ///
    /// Lines are ignored once the processor has left `Running`.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        if self.state != State::Running {
            return None;
        }
        info!("Received command: {}", line);

        match Command::parse(line) {
            Ok(Command::Exit) => {
                info!("Exit requested");
                self.state = State::Terminating;
                None
            }
            Ok(cmd) => cmd.execute(&mut self.store),
            Err(ParseError::Empty) => None,
            Err(e) => {
                warn!("Ignoring malformed command '{}': {}", line, e);
                None
            }
        }
    }

    /// Release the store. Moves `Terminating` (or `Running`) to `Stopped`.
    pub fn shutdown(&mut self) -> usize {
        if self.state == State::Stopped {
            return 0;
        }
        if !self.store.is_empty() {
            info!(
                "Releasing store: {} records, {} bytes, longest chain {}",
                self.store.len(),
                self.store.resident_bytes(),
                self.store.max_chain_len()
            );
        }
        let released = self.store.teardown();
        self.state = State::Stopped;
        released
    }

    /// Read commands until `X` or end of input, writing query replies to `writer`.
    ///
    /// Every reply is flushed before the next line is read. The store is always
    /// released before returning.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> RunSummary
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        let mut lines = 0;

        while self.state == State::Running {
            buf.clear();
            let read = (&mut reader)
                .take(MAX_LINE_LEN as u64)
                .read_until(b'\n', &mut buf)
                .await;
            match read {
                Ok(0) => {
                    info!("End of input");
                    self.state = State::Terminating;
                }
                Ok(n) if n == MAX_LINE_LEN && buf.last() != Some(&b'\n') => {
                    lines += 1;
                    warn!("Ignoring command line longer than {} bytes", MAX_LINE_LEN);
                    if let Err(e) = discard_line(&mut reader).await {
                        error!("Error reading commands: {}", e);
                        self.state = State::Terminating;
                    }
                }
                Ok(_) => {
                    lines += 1;
                    let text = String::from_utf8_lossy(&buf);
                    let line = text.trim_end_matches(['\n', '\r']);

                    if let Some(reply) = self.handle_line(line) {
                        if let Err(e) = write_reply(&mut writer, &reply).await {
                            warn!("Failed to write reply: {}", e);
                            self.state = State::Terminating;
                        }
                    }
                }
                Err(e) => {
                    error!("Error reading commands: {}", e);
                    self.state = State::Terminating;
                }
            }
        }

        debug!("Processed {} lines", lines);
        let released = self.shutdown();
        RunSummary { lines, released }
    }
}

/// Skip input up to and including the next newline
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            return Ok(());
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let n = chunk.len();
                reader.consume(n);
            }
        }
    }
}

async fn write_reply<W>(writer: &mut W, reply: &Reply) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let encoded = reply.encode()?;
    writer.write_all(&encoded).await?;
    writer.flush().await
}
