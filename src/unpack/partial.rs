use std::io::{self, Read, Seek, SeekFrom};

/// A `Read + Seek` window over `[offset, offset + length)` of an
/// underlying reader.
///
/// Consumers see a file that starts at position 0 and ends at `length`,
/// which lets a generic ZIP reader scan an embedded archive (including its
/// end-of-central-directory search, which seeks relative to the end)
/// without ever learning it is inside a CRX container, and without a copy.
///
/// Handle ownership follows the type parameter: a `PartialFileView<File>`
/// closes the file when dropped, while `PartialFileView<&mut File>` leaves
/// the handle with the caller for reuse by other views.
#[derive(Debug)]
pub struct PartialFileView<R> {
    inner: R,
    offset: u64,
    length: u64,
    pos: u64,
}

impl<R: Read + Seek> PartialFileView<R> {
    /// Positions `inner` at `offset` and exposes the next `length` bytes.
    pub fn new(mut inner: R, offset: u64, length: u64) -> io::Result<Self> {
        inner.seek(SeekFrom::Start(offset))?;
        Ok(Self {
            inner,
            offset,
            length,
            pos: 0,
        })
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Read for PartialFileView<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.length {
            return Ok(0);
        }
        let remaining = self.length - self.pos;
        let want = remaining.min(buf.len() as u64) as usize;
        let read = self.inner.read(&mut buf[..want])?;
        self.pos += read as u64;
        Ok(read)
    }
}

impl<R: Read + Seek> Seek for PartialFileView<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => i128::from(p),
            SeekFrom::Current(d) => i128::from(self.pos) + i128::from(d),
            SeekFrom::End(d) => i128::from(self.length) + i128::from(d),
        };

        // Negative targets clamp to 0; seeking past the logical end is
        // allowed, mirroring plain file semantics.
        let target = u64::try_from(target.max(0)).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek target out of range")
        })?;

        let physical = self.offset.checked_add(target).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek target out of range")
        })?;

        self.inner.seek(SeekFrom::Start(physical))?;
        self.pos = target;
        Ok(target)
    }
}
