use astroshare_protocol::CHUNK_SIZE;

use crate::TransferError;

/// Number of chunks needed for a file of `size` bytes.
///
/// `ceil(size / CHUNK_SIZE)`: a file of exactly 1 MiB is one chunk,
/// one byte more is two.
pub fn chunk_count(size: u64) -> u32 {
    size.div_ceil(CHUNK_SIZE as u64) as u32
}

/// One indexed byte-range slice of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSlice<'a> {
    /// Zero-based chunk index.
    pub index: u32,
    /// Raw chunk bytes, `CHUNK_SIZE` long except possibly the last.
    pub data: &'a [u8],
}

/// Slices a payload into fixed-size chunks, in strictly increasing order.
///
/// Only one slice is borrowed at a time, so transferring chunk `i` never
/// requires chunk `i + 1` to be materialized anywhere.
pub struct ChunkSlicer<'a> {
    data: &'a [u8],
    offset: usize,
    next_index: u32,
}

impl<'a> ChunkSlicer<'a> {
    /// Creates a slicer over `data`.
    ///
    /// Fails if the payload is empty; the protocol has no representation
    /// for a zero-chunk upload.
    pub fn new(data: &'a [u8], name: &str) -> Result<Self, TransferError> {
        if data.is_empty() {
            return Err(TransferError::EmptyFile(name.to_string()));
        }
        Ok(Self {
            data,
            offset: 0,
            next_index: 0,
        })
    }

    /// Total number of chunks this slicer will yield.
    pub fn total_chunks(&self) -> u32 {
        chunk_count(self.data.len() as u64)
    }

    /// Returns the next chunk, or `None` once the payload is exhausted.
    pub fn next_chunk(&mut self) -> Option<ChunkSlice<'a>> {
        if self.offset >= self.data.len() {
            return None;
        }
        let end = usize::min(self.offset + CHUNK_SIZE, self.data.len());
        let slice = ChunkSlice {
            index: self.next_index,
            data: &self.data[self.offset..end],
        };
        self.offset = end;
        self.next_index += 1;
        Some(slice)
    }

    /// Bytes not yet yielded.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }
}
