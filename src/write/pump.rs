// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_lite::stream;

use crate::entry::builder::{ByteStream, ZipData};
use crate::error::{Result, ZipError};
use crate::spec::crc::crc32;

/// Drains one entry's byte source, folding every drained chunk into a
/// running CRC-32 and byte count.
///
/// Without shaping bounds the source's chunks are forwarded unchanged.
/// With a `first_part_size`, chunks of exactly that many bytes are emitted
/// (concatenating across source chunks) until the remainder falls below
/// it; a `last_part_size` additionally pins the length of the final chunk,
/// and a payload that cannot end on such a chunk fails the entry.
pub(crate) struct DataPump {
    source: ByteStream,
    shape: Option<Shape>,
    crc: u32,
    pumped: u64,
    source_done: bool,
    finished: bool,
}

struct Shape {
    first: Option<u64>,
    last: Option<u64>,
    buffer: BytesMut,
}

impl DataPump {
    pub fn new(data: ZipData, first_part_size: Option<u64>, last_part_size: Option<u64>) -> Self {
        let source = match data {
            ZipData::Stream(stream) => stream,
            ZipData::Bytes(bytes) => Box::pin(stream::once(Ok(bytes))) as ByteStream,
        };

        let shape = if first_part_size.is_some() || last_part_size.is_some() {
            Some(Shape { first: first_part_size, last: last_part_size, buffer: BytesMut::new() })
        } else {
            None
        };

        Self { source, shape, crc: 0, pumped: 0, source_done: false, finished: false }
    }

    /// The running CRC-32 of all drained bytes. Final once the pump has
    /// yielded `None`.
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// The number of bytes drained so far. Final once the pump has yielded
    /// `None`.
    pub fn bytes_pumped(&self) -> u64 {
        self.pumped
    }

    pub fn poll_chunk(&mut self, cx: &mut Context<'_>) -> Poll<Option<Result<Bytes>>> {
        loop {
            if self.finished {
                return Poll::Ready(None);
            }

            if let Some(shape) = &mut self.shape {
                if let Some(first) = shape.first {
                    // Hold back enough bytes for the pinned final part so
                    // full-size parts never eat into it.
                    let hold = shape.last.unwrap_or(0);
                    if shape.buffer.len() as u64 >= first.saturating_add(hold) {
                        return Poll::Ready(Some(Ok(shape.buffer.split_to(first as usize).freeze())));
                    }
                }

                if self.source_done {
                    self.finished = true;
                    if let Some(last) = shape.last {
                        if shape.buffer.len() as u64 != last {
                            return Poll::Ready(Some(Err(ZipError::MalformedInput("Invalid lastPartSize"))));
                        }
                    }
                    if shape.buffer.is_empty() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Ok(shape.buffer.split().freeze())));
                }
            } else if self.source_done {
                self.finished = true;
                return Poll::Ready(None);
            }

            match self.source.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => self.source_done = true,
                Poll::Ready(Some(Err(err))) => {
                    self.finished = true;
                    return Poll::Ready(Some(Err(ZipError::source_failure(err))));
                }
                Poll::Ready(Some(Ok(chunk))) => {
                    self.crc = crc32(&chunk, self.crc);
                    self.pumped += chunk.len() as u64;

                    match &mut self.shape {
                        Some(shape) => shape.buffer.extend_from_slice(&chunk),
                        None => {
                            if chunk.is_empty() {
                                continue;
                            }
                            return Poll::Ready(Some(Ok(chunk)));
                        }
                    }
                }
            }
        }
    }
}
