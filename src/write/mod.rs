// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

//! The archive producer.
//!
//! [`make_zip`] walks the caller's items and yields the archive as a pull
//! stream of byte chunks: each entry's local file header, its payload
//! drained one source chunk at a time, a trailing data descriptor, then the
//! accumulated central directory and the terminator records. No work
//! happens until the consumer polls, and at most one entry's byte source is
//! open at any time.
//!
//! # Example
//! ```
//! # use streamzip::{make_zip, items_from_iter, ZipItem, ZipOptions};
//! # use futures_lite::StreamExt;
//! # futures_lite::future::block_on(async {
//! let items = items_from_iter(vec![
//!     ZipItem::file("hello.txt", "Hello, World!"),
//!     ZipItem::folder("assets"),
//! ]);
//!
//! let mut stream = make_zip(items, ZipOptions::new());
//! let mut archive = Vec::new();
//! while let Some(chunk) = stream.next().await {
//!     archive.extend_from_slice(&chunk.unwrap());
//! }
//! # });
//! ```

pub(crate) mod assemble;
mod iter;
pub(crate) mod pump;

pub use iter::{make_zip_iter, ZipStreamIter};

use std::future::Future;
use std::io;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_channel::oneshot;
use futures_lite::{stream, Stream};

use crate::abort::AbortToken;
use crate::entry::builder::ZipItem;
use crate::entry::{Entry, EntryMeta};
use crate::error::{Result, ZipError};
use crate::predict::predict_length;
use crate::spec::consts::LFH_LENGTH;
use crate::write::pump::DataPump;

/// Invoked after each entry's central directory record has been assembled,
/// with that entry's metadata. Returning an error aborts the archive.
pub type EntryCallback = Box<dyn FnMut(&EntryRecord) -> Result<()> + Send>;

/// Invoked after each entry completes, with a copy of the central directory
/// accumulated so far. Returning an error aborts the archive.
pub type CentralRecordCallback = Box<dyn FnMut(Bytes) -> Result<()> + Send>;

/// Options for [`make_zip`] and its variants.
#[derive(Default)]
pub struct ZipOptions {
    pub(crate) buffers_are_utf8: bool,
    pub(crate) on_entry: Option<EntryCallback>,
    pub(crate) on_central_record_update: Option<CentralRecordCallback>,
    pub(crate) signal: Option<AbortToken>,
    pub(crate) metadata: Option<Vec<EntryMeta>>,
    pub(crate) resume: Option<ResumeState>,
}

impl ZipOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags raw-byte names as UTF-8 in the general purpose flags.
    pub fn buffers_are_utf8(mut self, yes: bool) -> Self {
        self.buffers_are_utf8 = yes;
        self
    }

    /// Registers a per-entry metadata callback.
    pub fn on_entry(mut self, callback: impl FnMut(&EntryRecord) -> Result<()> + Send + 'static) -> Self {
        self.on_entry = Some(Box::new(callback));
        self
    }

    /// Registers a callback observing the running central directory bytes,
    /// as needed to later resume a paused archive.
    pub fn on_central_record_update(mut self, callback: impl FnMut(Bytes) -> Result<()> + Send + 'static) -> Self {
        self.on_central_record_update = Some(Box::new(callback));
        self
    }

    /// Attaches an external cancellation token.
    pub fn signal(mut self, token: AbortToken) -> Self {
        self.signal = Some(token);
        self
    }

    /// Supplies per-item declared sizes, enabling
    /// [`ZipStream::total_size`].
    pub fn metadata(mut self, metadata: Vec<EntryMeta>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Continues a previously paused archive instead of starting a new one.
    pub fn resume(mut self, state: ResumeState) -> Self {
        self.resume = Some(state);
        self
    }
}

/// Everything a paused archive needs to continue: the central directory
/// accumulated in the first phase, how many entries and bytes it covered,
/// and whether any of them already required zip64.
///
/// Feeding this to [`ZipOptions::resume`] along with the remaining items
/// yields a continuation whose bytes, appended to the first phase's bytes,
/// form exactly the archive a single uninterrupted pass would have built.
#[derive(Debug, Clone)]
pub struct ResumeState {
    pub central_record: Vec<u8>,
    pub previous_file_count: u64,
    pub starting_offset: u64,
    pub archive_needs_zip64: bool,
}

/// Metadata for one completed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub filename: String,
    /// Absolute offset of the entry's local file header.
    pub offset: u64,
    /// Absolute offset of the entry's payload, `offset + header_size`.
    pub data_offset: u64,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
    /// Always 0 (STORE).
    pub compression_method: u16,
    pub flags: u16,
    /// Local file header length including the name, `30 + name length`.
    pub header_size: u16,
}

/// A deferred value resolving to every [`EntryRecord`] of the archive once
/// the stream completes, or failing with the error that terminated it.
pub struct EntriesPromise {
    receiver: oneshot::Receiver<Result<Vec<EntryRecord>>>,
}

impl Future for EntriesPromise {
    type Output = Result<Vec<EntryRecord>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // The stream was dropped before finishing.
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(ZipError::Aborted(None))),
        }
    }
}

/// Returns a pull-driven byte stream producing the archive.
pub fn make_zip<S>(items: S, options: ZipOptions) -> ZipStream<S>
where
    S: Stream<Item = io::Result<ZipItem>> + Unpin,
{
    ZipStream::new(items, options, None)
}

/// Returns the archive stream along with a deferred value resolving to the
/// full list of entry metadata records once the stream ends.
pub fn make_zip_with_entries<S>(items: S, options: ZipOptions) -> (ZipStream<S>, EntriesPromise)
where
    S: Stream<Item = io::Result<ZipItem>> + Unpin,
{
    let (sender, receiver) = oneshot::channel();
    (ZipStream::new(items, options, Some(sender)), EntriesPromise { receiver })
}

/// The type returned by [`items_from_iter`].
pub type ItemsFromIter<I> = stream::Iter<std::iter::Map<I, fn(ZipItem) -> io::Result<ZipItem>>>;

/// Lifts a plain collection of items into the item stream the producer
/// pulls from.
pub fn items_from_iter<I>(items: I) -> ItemsFromIter<I::IntoIter>
where
    I: IntoIterator<Item = ZipItem>,
{
    stream::iter(items.into_iter().map(Ok as fn(ZipItem) -> io::Result<ZipItem>))
}

enum State {
    /// Between entries: pull the next item (or move to finalization).
    Next,
    /// Draining the current entry's payload.
    Pumping { entry: Entry, pump: DataPump },
    /// All entries done; emit the central directory.
    Central,
    /// Emit the terminator records.
    Terminator { cd_offset: u64, cd_size: u64 },
    /// Completed, failed, or cancelled; the stream yields nothing further.
    Finished,
}

/// A pull-driven archive producer.
///
/// Implements `Stream<Item = Result<Bytes>>`; the archive is the
/// concatenation of the yielded chunks. The producer advances only when
/// polled and drains inputs one entry at a time, so dropping the stream
/// mid-archive releases the active byte source without reading the
/// remaining items.
pub struct ZipStream<S> {
    items: S,
    state: State,
    bytes_emitted: u64,
    file_count: u64,
    needs_zip64: bool,
    central: Vec<u8>,
    buffers_are_utf8: bool,
    on_entry: Option<EntryCallback>,
    on_central_record_update: Option<CentralRecordCallback>,
    signal: Option<AbortToken>,
    total_size: Option<u64>,
    records: Option<Vec<EntryRecord>>,
    entries_sender: Option<oneshot::Sender<Result<Vec<EntryRecord>>>>,
}

impl<S> ZipStream<S>
where
    S: Stream<Item = io::Result<ZipItem>> + Unpin,
{
    fn new(items: S, options: ZipOptions, entries_sender: Option<oneshot::Sender<Result<Vec<EntryRecord>>>>) -> Self {
        // A resumed archive has unknowable phase-1 contents, so no total.
        let total_size = match (&options.resume, &options.metadata) {
            (None, Some(metadata)) => predict_length(metadata.iter()),
            _ => None,
        };

        let (central, file_count, bytes_emitted, needs_zip64) = match options.resume {
            Some(resume) => {
                (resume.central_record, resume.previous_file_count, resume.starting_offset, resume.archive_needs_zip64)
            }
            None => (Vec::new(), 0, 0, false),
        };

        Self {
            items,
            state: State::Next,
            bytes_emitted,
            file_count,
            needs_zip64,
            central,
            buffers_are_utf8: options.buffers_are_utf8,
            on_entry: options.on_entry,
            on_central_record_update: options.on_central_record_update,
            signal: options.signal,
            total_size,
            records: entries_sender.as_ref().map(|_| Vec::new()),
            entries_sender,
        }
    }

    /// The exact archive length in bytes, when the supplied metadata made
    /// it computable up front.
    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    fn abort_error(&self) -> Option<ZipError> {
        let signal = self.signal.as_ref()?;
        if signal.is_aborted() {
            Some(ZipError::Aborted(signal.reason()))
        } else {
            None
        }
    }

    fn fail(&mut self, err: ZipError) -> Poll<Option<Result<Bytes>>> {
        tracing::debug!(error = %err, "archive production failed");
        // Dropping the state releases the active byte source, if any.
        self.state = State::Finished;
        if let Some(sender) = self.entries_sender.take() {
            let _ = sender.send(Err(err.clone()));
        }
        Poll::Ready(Some(Err(err)))
    }

    /// Appends the entry's central directory record and runs the per-entry
    /// callbacks. Called exactly once per entry, right after its last byte
    /// (payload or descriptor) has been produced.
    fn finish_entry(&mut self, entry: Entry) -> Result<()> {
        let zip64 =
            assemble::entry_needs_zip64(entry.uncompressed_size, entry.uncompressed_size, entry.header_offset);
        if zip64 {
            self.needs_zip64 = true;
        }

        self.central.extend_from_slice(&assemble::central_directory_header(&entry, zip64));
        self.file_count += 1;

        let header_size = (LFH_LENGTH + entry.name.len()) as u16;
        let record = EntryRecord {
            filename: entry.name.to_string_lossy(),
            offset: entry.header_offset,
            data_offset: entry.header_offset + header_size as u64,
            compressed_size: entry.uncompressed_size,
            uncompressed_size: entry.uncompressed_size,
            crc32: entry.crc,
            compression_method: 0,
            flags: entry.flags,
            header_size,
        };
        tracing::trace!(filename = %record.filename, size = record.uncompressed_size, zip64, "entry finished");

        if let Some(on_entry) = &mut self.on_entry {
            on_entry(&record)?;
        }
        if let Some(records) = &mut self.records {
            records.push(record);
        }
        if let Some(on_central) = &mut self.on_central_record_update {
            // Hand the callback its own copy; the live buffer keeps growing.
            on_central(Bytes::copy_from_slice(&self.central))?;
        }
        Ok(())
    }
}

impl<S> Stream for ZipStream<S>
where
    S: Stream<Item = io::Result<ZipItem>> + Unpin,
{
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            // The abort signal is checked at every entry boundary and at
            // every pump iteration.
            if matches!(this.state, State::Next | State::Pumping { .. }) {
                if let Some(err) = this.abort_error() {
                    return this.fail(err);
                }
            }

            match &mut this.state {
                State::Finished => return Poll::Ready(None),

                State::Next => {
                    match Pin::new(&mut this.items).poll_next(cx) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(None) => this.state = State::Central,
                        Poll::Ready(Some(Err(err))) => return this.fail(ZipError::iterator_failure(err)),
                        Poll::Ready(Some(Ok(item))) => {
                            let mut entry = match Entry::normalize(item, this.buffers_are_utf8) {
                                Ok(entry) => entry,
                                Err(err) => return this.fail(err),
                            };
                            entry.header_offset = this.bytes_emitted;
                            tracing::trace!(offset = entry.header_offset, "starting entry");

                            let chunk = assemble::local_file_header(&entry);
                            this.bytes_emitted += chunk.len() as u64;

                            match entry.data.take() {
                                Some(data) => {
                                    let pump = DataPump::new(data, entry.first_part_size, entry.last_part_size);
                                    this.state = State::Pumping { entry, pump };
                                }
                                // Folders carry no payload and no descriptor.
                                None => {
                                    if let Err(err) = this.finish_entry(entry) {
                                        return this.fail(err);
                                    }
                                }
                            }
                            return Poll::Ready(Some(Ok(chunk)));
                        }
                    }
                }

                State::Pumping { pump, .. } => {
                    match pump.poll_chunk(cx) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(Some(Ok(chunk))) => {
                            this.bytes_emitted += chunk.len() as u64;
                            return Poll::Ready(Some(Ok(chunk)));
                        }
                        Poll::Ready(Some(Err(err))) => return this.fail(err),
                        Poll::Ready(None) => {
                            let State::Pumping { mut entry, pump } = mem::replace(&mut this.state, State::Next)
                            else {
                                unreachable!()
                            };
                            entry.crc = pump.crc();
                            entry.uncompressed_size = pump.bytes_pumped();

                            if let Some(declared) = entry.declared_size {
                                if declared != entry.uncompressed_size {
                                    return this
                                        .fail(ZipError::MalformedInput("file data did not match its declared size"));
                                }
                            }

                            let zip64 = assemble::entry_needs_zip64(
                                entry.uncompressed_size,
                                entry.uncompressed_size,
                                entry.header_offset,
                            );
                            let chunk = assemble::data_descriptor(&entry, zip64);
                            this.bytes_emitted += chunk.len() as u64;

                            if let Err(err) = this.finish_entry(entry) {
                                return this.fail(err);
                            }
                            return Poll::Ready(Some(Ok(chunk)));
                        }
                    }
                }

                State::Central => {
                    let cd_offset = this.bytes_emitted;
                    let cd_size = this.central.len() as u64;
                    if assemble::archive_needs_zip64(cd_offset, cd_size, this.file_count) {
                        this.needs_zip64 = true;
                    }
                    this.state = State::Terminator { cd_offset, cd_size };
                    if cd_size > 0 {
                        let chunk = Bytes::from(mem::take(&mut this.central));
                        this.bytes_emitted += chunk.len() as u64;
                        return Poll::Ready(Some(Ok(chunk)));
                    }
                    // Zero entries: nothing to emit, fall through.
                }

                State::Terminator { cd_offset, cd_size } => {
                    let chunk = assemble::finalization(*cd_offset, *cd_size, this.file_count, this.needs_zip64);
                    this.bytes_emitted += chunk.len() as u64;
                    tracing::debug!(
                        entries = this.file_count,
                        zip64 = this.needs_zip64,
                        total = this.bytes_emitted,
                        "archive finalized"
                    );
                    if let Some(sender) = this.entries_sender.take() {
                        let _ = sender.send(Ok(this.records.take().unwrap_or_default()));
                    }
                    this.state = State::Finished;
                    return Poll::Ready(Some(Ok(chunk)));
                }
            }
        }
    }
}
