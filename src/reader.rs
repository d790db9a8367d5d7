//! Record stream reader
//!
//! Splits a byte stream into [`RawRecord`]s in a single forward pass.
//!
//! End-of-stream handling:
//! - fewer than 4 bytes left for a header ends the stream cleanly
//! - fewer than `length` bytes left for a payload yields a short payload,
//!   which downstream decoders must tolerate

use crate::error::Result;
use crate::record::{RawRecord, HEADER_LEN};
use std::io::{ErrorKind, Read};

/// Forward-only reader of framed records
pub struct RecordReader<R> {
    inner: R,
    finished: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            finished: false,
        }
    }

    /// Read the next record, or `None` at end of stream
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        if self.finished {
            return Ok(None);
        }

        let mut header = [0u8; HEADER_LEN];
        let got = self.fill(&mut header)?;
        if got < HEADER_LEN {
            if got > 0 {
                tracing::debug!(bytes = got, "Trailing partial header ignored");
            }
            self.finished = true;
            return Ok(None);
        }

        let length = u16::from_le_bytes([header[0], header[1]]);
        let rec_type = header[2];
        let rec_sub = header[3];

        let mut payload = Vec::with_capacity(usize::from(length));
        (&mut self.inner)
            .take(u64::from(length))
            .read_to_end(&mut payload)?;

        let record = RawRecord {
            rec_type,
            rec_sub,
            length,
            payload,
        };

        if record.is_truncated() {
            tracing::debug!(
                kind = %record.kind(),
                declared = length,
                actual = record.payload.len(),
                "Payload truncated by end of stream"
            );
            self.finished = true;
        } else {
            tracing::trace!(kind = %record.kind(), length, "Framed record");
        }

        Ok(Some(record))
    }

    /// Read every remaining record in arrival order
    pub fn read_all(mut self) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Fill `buf` as far as the stream allows, returning the byte count
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
