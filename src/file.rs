//! File-backed targets.
//!
//! Both targets open a file either for writing (truncating it) or for
//! reading, never both. Handles are released when the target is dropped;
//! [`BufferedFileTarget`] additionally flushes pending writes at that point.
//!
//! ```rust,no_run
//! use serde_duplex::{CodecOptions, Decoder, Encoder, FileTarget};
//!
//! # fn main() -> serde_duplex::Result<()> {
//! {
//!     let mut target = FileTarget::create("numbers.txt")?;
//!     Encoder::new(&mut target, CodecOptions::text()).write(&vec![1, 2, 3])?;
//! }
//!
//! let mut target = FileTarget::open("numbers.txt")?;
//! let numbers: Vec<i32> = Decoder::new(&mut target, CodecOptions::text()).read()?;
//! assert_eq!(numbers, vec![1, 2, 3]);
//! # Ok(())
//! # }
//! ```

use crate::target::window_bounds;
use crate::{Error, Result, Target};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for [`BufferedFileTarget`]: 1 MiB.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Read,
    Write,
}

fn wrong_mode(path: &Path, mode: Mode) -> Error {
    let opened = match mode {
        Mode::Read => "reading",
        Mode::Write => "writing",
    };
    Error::backend(&format!("{} is opened for {}", path.display(), opened))
}

fn short_read(pos: u64, needed: usize, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::backend_at(pos, &format!("unexpected end of file: needed {} bytes", needed))
    } else {
        Error::backend_at(pos, &err.to_string())
    }
}

/// Reads the context window around logical position `pos`, restoring the
/// file offset afterwards.
fn read_window<F: Read + Seek>(
    mut file: F,
    len: u64,
    pos: u64,
    before: usize,
    after: usize,
    offset: i64,
) -> io::Result<Vec<u8>> {
    let (start, end) = window_bounds(len, pos, before, after, offset);
    let saved = file.stream_position()?;
    file.seek(SeekFrom::Start(start))?;
    let mut window = Vec::with_capacity((end - start) as usize);
    let result = (&mut file).take(end - start).read_to_end(&mut window);
    file.seek(SeekFrom::Start(saved))?;
    result.map(|_| window)
}

/// Unbuffered file target: every write and read goes straight to the OS.
#[derive(Debug)]
pub struct FileTarget {
    file: File,
    path: PathBuf,
    mode: Mode,
    read_pos: u64,
}

impl FileTarget {
    /// Creates (or truncates) `path` for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        tracing::debug!(path = %path.display(), "created file target");
        Ok(FileTarget {
            file,
            path,
            mode: Mode::Write,
            read_pos: 0,
        })
    }

    /// Opens `path` for reading from its first byte.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        tracing::debug!(path = %path.display(), "opened file target");
        Ok(FileTarget {
            file,
            path,
            mode: Mode::Read,
            read_pos: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn require(&self, mode: Mode) -> Result<()> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(wrong_mode(&self.path, self.mode))
        }
    }
}

impl Target for FileTarget {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.require(Mode::Write)?;
        self.file.write_all(bytes)?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        self.require(Mode::Read)?;
        match self.file.read_exact(buf) {
            Ok(()) => {
                self.read_pos += buf.len() as u64;
                Ok(())
            }
            Err(err) => {
                let failed_at = self.read_pos;
                self.read_pos = self.file.stream_position()?;
                Err(short_read(failed_at, buf.len(), err))
            }
        }
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        self.require(Mode::Read)?;
        let mut byte = [0u8; 1];
        if self.file.read(&mut byte)? == 0 {
            return Ok(None);
        }
        self.file.seek(SeekFrom::Current(-1))?;
        Ok(Some(byte[0]))
    }

    fn tell(&self) -> u64 {
        self.read_pos
    }

    fn context(&mut self, before: usize, after: usize, offset: i64) -> Result<Vec<u8>> {
        if self.mode != Mode::Read {
            return Ok(Vec::new());
        }
        let len = self.file.metadata()?.len();
        Ok(read_window(
            &mut self.file,
            len,
            self.read_pos,
            before,
            after,
            offset,
        )?)
    }
}

enum Inner {
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

/// File target that batches writes and reads through a fixed-size buffer.
///
/// Pending writes are flushed when the target is dropped. A flush failure at
/// drop time can only be logged, so callers that need to observe it should
/// call [`BufferedFileTarget::flush`] first.
pub struct BufferedFileTarget {
    inner: Inner,
    path: PathBuf,
    read_pos: u64,
}

impl BufferedFileTarget {
    /// Creates (or truncates) `path` for writing with the default buffer size.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_capacity(path, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn create_with_capacity<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        tracing::debug!(path = %path.display(), capacity, "created buffered file target");
        Ok(BufferedFileTarget {
            inner: Inner::Writer(BufWriter::with_capacity(capacity, file)),
            path,
            read_pos: 0,
        })
    }

    /// Opens `path` for reading with the default buffer size.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_capacity(path, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn open_with_capacity<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        tracing::debug!(path = %path.display(), capacity, "opened buffered file target");
        Ok(BufferedFileTarget {
            inner: Inner::Reader(BufReader::with_capacity(capacity, file)),
            path,
            read_pos: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes any buffered bytes through to the file.
    ///
    /// A no-op for targets opened for reading.
    pub fn flush(&mut self) -> Result<()> {
        if let Inner::Writer(writer) = &mut self.inner {
            writer.flush()?;
            tracing::trace!(path = %self.path.display(), "flushed buffered file target");
        }
        Ok(())
    }

    fn reader(&mut self) -> Result<&mut BufReader<File>> {
        match &mut self.inner {
            Inner::Reader(reader) => Ok(reader),
            Inner::Writer(_) => Err(wrong_mode(&self.path, Mode::Write)),
        }
    }
}

impl Target for BufferedFileTarget {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        match &mut self.inner {
            Inner::Writer(writer) => {
                writer.write_all(bytes)?;
                Ok(())
            }
            Inner::Reader(_) => Err(wrong_mode(&self.path, Mode::Read)),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let failed_at = self.read_pos;
        let reader = self.reader()?;
        match reader.read_exact(buf) {
            Ok(()) => {
                self.read_pos += buf.len() as u64;
                Ok(())
            }
            Err(err) => {
                let stopped_at = reader.stream_position()?;
                self.read_pos = stopped_at;
                Err(short_read(failed_at, buf.len(), err))
            }
        }
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.reader()?.fill_buf()?.first().copied())
    }

    fn tell(&self) -> u64 {
        self.read_pos
    }

    fn context(&mut self, before: usize, after: usize, offset: i64) -> Result<Vec<u8>> {
        let pos = self.read_pos;
        let file = match &self.inner {
            Inner::Reader(reader) => reader.get_ref(),
            Inner::Writer(_) => return Ok(Vec::new()),
        };
        let len = file.metadata()?.len();
        // Seeking through `&File` moves the shared OS offset; `read_window`
        // restores it so the reader's buffered state stays valid.
        Ok(read_window(file, len, pos, before, after, offset)?)
    }
}

impl Drop for BufferedFileTarget {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::warn!(path = %self.path.display(), "failed to flush buffered file target: {}", err);
        }
    }
}
