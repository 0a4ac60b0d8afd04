//! # Sound handoff
//!
//! The game loop and the playback thread share one buffer-sized mailbox built
//! on an `rtrb` ring. The sender fills it only when it is completely empty; the
//! receiver writes the whole pending buffer to its sink and only then releases
//! the slots, so "busy" means "still being played", not merely "queued".
//!
//! ```text
//!   game loop                         playback thread
//!  ┌──────────────┐   write_chunk   ┌──────────────┐   write_all   ┌──────┐
//!  │ SoundSender  │ ──────────────► │ SoundReceiver│ ────────────► │ sink │
//!  └──────────────┘  (0 if busy)    └──────────────┘  commit_all   └──────┘
//! ```

use std::io::Write;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, trace, warn};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::{GdkError, Result};

const IDLE_POLL: Duration = Duration::from_millis(1);

pub fn channel(buffer_length: usize) -> (SoundSender, SoundReceiver) {
    let (producer, consumer) = RingBuffer::<u8>::new(buffer_length);
    (SoundSender { producer, buffer_length }, SoundReceiver { consumer })
}

/// Start a named playback thread writing into `sink`. The thread ends once the
/// returned sender is dropped and the last buffer has been played.
pub fn spawn_playback<W>(mut sink: W, buffer_length: usize) -> Result<(SoundSender, JoinHandle<Result<()>>)>
where
    W: Write + Send + 'static,
{
    let (sender, receiver) = channel(buffer_length);
    let handle = thread::Builder::new()
        .name("gdk-sound".into())
        .spawn(move || receiver.run(&mut sink))?;
    Ok((sender, handle))
}

pub struct SoundSender {
    producer: Producer<u8>,
    buffer_length: usize,
}

impl SoundSender {
    pub fn buffer_length(&self) -> usize {
        self.buffer_length
    }

    /// The playback side still exists. Once it stops (its sink failed or it
    /// was dropped) nothing sent will ever be played.
    pub fn is_alive(&self) -> bool {
        !self.producer.is_abandoned()
    }

    /// The previous buffer has not finished playing yet.
    pub fn is_busy(&self) -> bool {
        self.producer.slots() < self.buffer_length
    }

    /// Hand a buffer to the playback thread. Returns how many bytes were taken:
    /// at most one buffer length, or 0 while busy. Fails once playback has
    /// stopped, so a dead device is never mistaken for a busy one.
    pub fn send(&mut self, buffer: &[u8]) -> Result<usize> {
        if !self.is_alive() {
            return Err(GdkError::Display("sound playback has stopped".into()));
        }
        if self.is_busy() {
            return Ok(0);
        }

        let amount = buffer.len().min(self.buffer_length);
        if amount == 0 {
            return Ok(0);
        }
        let Ok(mut chunk) = self.producer.write_chunk(amount) else {
            return Ok(0);
        };

        let (first, second) = chunk.as_mut_slices();
        first.copy_from_slice(&buffer[..first.len()]);
        second.copy_from_slice(&buffer[first.len()..amount]);
        chunk.commit_all();
        trace!("queued {} sound bytes", amount);
        Ok(amount)
    }
}

pub struct SoundReceiver {
    consumer: Consumer<u8>,
}

impl SoundReceiver {
    /// Play buffers into `sink` until the sender is gone and nothing is pending.
    pub fn run(mut self, sink: &mut impl Write) -> Result<()> {
        loop {
            let pending = self.consumer.slots();
            if pending == 0 {
                if self.consumer.is_abandoned() && self.consumer.is_empty() {
                    debug!("sound sender dropped, stopping playback");
                    return Ok(());
                }
                thread::sleep(IDLE_POLL);
                continue;
            }

            let Ok(chunk) = self.consumer.read_chunk(pending) else {
                continue;
            };
            let (first, second) = chunk.as_slices();
            if let Err(e) = sink.write_all(first).and_then(|_| sink.write_all(second)).and_then(|_| sink.flush()) {
                warn!("sound sink failed, stopping playback: {}", e);
                return Err(e.into());
            }
            chunk.commit_all();
        }
    }
}
