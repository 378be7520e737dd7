//! Streaming compressor adapter: feed a file permutation through a zstd
//! encoder and count the output bytes without ever storing them.
//!
//! The producer walks the permutation and sends content chunks over a
//! bounded channel to a dedicated encoder thread; a full channel blocks
//! the send, so nothing buffers beyond the channel capacity. The
//! encoder writes into a counting sink and the frame total comes back
//! when the channel closes.

use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;

use tracing::trace;
use zstd::stream::write::Encoder;

use crate::config::EstimatorConfig;
use crate::corpus::EligibleFile;
use crate::error::{Result, ShrinkageError};

/// Largest chunk handed to the encoder thread in one send
const CHUNK_SIZE: usize = 64 * 1024;

/// In-flight chunks before the producer suspends
const CHANNEL_CAPACITY: usize = 8;

/// Highest compression-effort preset the algorithm supports
pub fn max_compression_level() -> i32 {
    *zstd::compression_level_range().end()
}

/// Output sink that counts emitted bytes and discards them
#[derive(Debug, Default)]
struct CountingSink {
    written: u64,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One configured compression transform, reused across sampling rounds
#[derive(Debug, Clone)]
pub struct StreamCompressor {
    level: i32,
    workers: u32,
    separator: Option<u8>,
}

impl StreamCompressor {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            level: config.level,
            workers: config.workers,
            separator: config.separator,
        }
    }

    /// Compress the concatenation of `files` in the given order and
    /// return the total compressed byte count. A transform error is
    /// fatal for the run; it is never retried.
    pub fn compress(&self, files: &[&EligibleFile]) -> Result<u64> {
        let (tx, rx) = mpsc::sync_channel::<&[u8]>(CHANNEL_CAPACITY);
        let separator: Option<[u8; 1]> = self.separator.map(|byte| [byte]);
        let level = self.level;
        let workers = self.workers;

        thread::scope(|scope| {
            let encoder = scope.spawn(move || -> io::Result<u64> {
                let mut encoder = Encoder::new(CountingSink::default(), level)?;
                // output is never persisted or verified, so no checksum
                encoder.include_checksum(false)?;
                if workers > 0 {
                    encoder.multithread(workers)?;
                }
                for chunk in rx {
                    encoder.write_all(chunk)?;
                }
                Ok(encoder.finish()?.written)
            });

            // A failed send means the encoder hung up on an error; stop
            // feeding and let join report it.
            'feed: for (index, file) in files.iter().enumerate() {
                if index > 0 {
                    if let Some(sep) = separator.as_ref() {
                        if tx.send(&sep[..]).is_err() {
                            break 'feed;
                        }
                    }
                }
                for chunk in file.content.chunks(CHUNK_SIZE) {
                    if tx.send(chunk).is_err() {
                        break 'feed;
                    }
                }
            }
            drop(tx);

            match encoder.join() {
                Ok(Ok(written)) => {
                    trace!(files = files.len(), compressed = written, "round complete");
                    Ok(written)
                }
                Ok(Err(err)) => Err(ShrinkageError::Compression(err)),
                Err(_) => Err(ShrinkageError::CompressionWorker),
            }
        })
    }
}
