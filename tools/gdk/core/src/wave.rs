//! Canonical 16 bit PCM WAVE files and a block-wise player feeding a
//! [`SoundSender`].

use std::path::Path;

use log::debug;

use crate::bitmap::read_u16;
use crate::error::{GdkError, Result};
use crate::sound::SoundSender;

pub const HEADER_LENGTH: usize = 44;

const PCM: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    rate: u32,
    channels: u16,
    bits: u16,
    block: u16,
    data: Vec<u8>,
}

fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl Wave {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let head = bytes
            .get(..HEADER_LENGTH)
            .ok_or_else(|| GdkError::InvalidWave("file is shorter than a wave header".into()))?;

        if &head[0..4] != b"RIFF" {
            return Err(GdkError::InvalidWave("incorrect riff signature".into()));
        }
        if &head[8..12] != b"WAVE" {
            return Err(GdkError::InvalidWave("incorrect wave signature".into()));
        }

        let kind = read_u16(head, 20);
        let channels = read_u16(head, 22);
        let rate = u32_at(head, 24);
        let block = read_u16(head, 32);
        let bits = read_u16(head, 34);
        let length = u32_at(head, 40) as usize;

        if kind != PCM {
            return Err(GdkError::InvalidWave(format!("unsupported wave type: {}", kind)));
        }
        if bits != 16 {
            return Err(GdkError::InvalidWave(format!("unsupported sample size: {} bits", bits)));
        }
        if !(1..=2).contains(&channels) {
            return Err(GdkError::InvalidWave(format!("unsupported channel count: {}", channels)));
        }

        let data = bytes
            .get(HEADER_LENGTH..HEADER_LENGTH + length)
            .ok_or_else(|| GdkError::InvalidWave(format!("data chunk of {} bytes is truncated", length)))?;
        debug!("wave {} Hz, {} channel(s), {} data bytes", rate, channels, length);

        Ok(Self { rate, channels, bits, block, data: data.to_vec() })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&std::fs::read(path)?)
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Bytes per sample frame across all channels.
    pub fn block(&self) -> u16 {
        self.block
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Streams a wave through a sender one buffer at a time.
#[derive(Debug, Clone)]
pub struct Player {
    wave: Wave,
    index: usize,
}

impl Player {
    pub fn new(wave: Wave) -> Self {
        Self { wave, index: 0 }
    }

    pub fn wave(&self) -> &Wave {
        &self.wave
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.index == self.wave.data.len()
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Offer the next block if the device is idle. Does nothing at the end.
    pub fn play(&mut self, sender: &mut SoundSender) -> Result<()> {
        if self.is_end() {
            return Ok(());
        }
        let stop = (self.index + sender.buffer_length()).min(self.wave.data.len());
        self.index += sender.send(&self.wave.data[self.index..stop])?;
        Ok(())
    }

    pub fn loop_playback(&mut self, sender: &mut SoundSender) -> Result<()> {
        if self.is_end() {
            self.rewind();
            Ok(())
        } else {
            self.play(sender)
        }
    }
}
