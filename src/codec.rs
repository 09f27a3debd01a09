use bytes::{Buf, BytesMut};
use std::convert::TryInto;
use std::io::Cursor;
use thiserror::Error as ThisError;
use tokio_util::codec::Decoder;

use crate::request::{self, Request};

pub const DEFAULT_MAX_FRAME_SIZE: usize = 512 * 1024 * 1024;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] request::Error),
    #[error("protocol error; frame size exceeds limit of {limit} bytes")]
    FrameTooLarge { limit: usize },
    #[error("protocol error; connection closed in the middle of a frame")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by malformed client input, as opposed to a socket failure.
    pub fn is_protocol(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

/// Splits a byte stream into requests.
///
/// Bytes stay in the read buffer until a whole request is available, so a request that arrives
/// over several reads is decoded once it is complete.
pub struct RequestCodec {
    max_frame_size: usize,
}

impl RequestCodec {
    pub fn new(max_frame_size: usize) -> RequestCodec {
        RequestCodec { max_frame_size }
    }
}

impl Default for RequestCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_SIZE)
    }
}

impl Decoder for RequestCodec {
    type Item = Request;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut cursor = Cursor::new(&src[..]);
        let request = match Request::parse(&mut cursor) {
            Ok(request) => request,
            Err(request::Error::Incomplete) => {
                if src.len() > self.max_frame_size {
                    return Err(Error::FrameTooLarge {
                        limit: self.max_frame_size,
                    });
                }
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let position: usize = cursor
            .position()
            .try_into()
            .map_err(|_| Error::FrameTooLarge {
                limit: self.max_frame_size,
            })?;

        // Remove the parsed request from the buffer.
        src.advance(position);

        Ok(Some(request))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None if buf.is_empty() => Ok(None),
            None => Err(Error::UnexpectedEof),
        }
    }
}
