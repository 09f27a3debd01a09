use std::io::Cursor;

use bytes::Buf;
use thiserror::Error as ThisError;

const ARRAY_MARKER: u8 = b'*';
const BULK_MARKER: u8 = b'$';

/// Upper bound on the capacity reserved up front from an untrusted argument count.
const MAX_PREALLOCATED_ARGS: usize = 1024;

#[derive(Debug, ThisError, PartialEq)]
pub enum Error {
    #[error("not enough data is available to parse an entire request")]
    Incomplete,
    #[error("protocol error; expected '*', got {0:?}")]
    MissingArrayMarker(char),
    #[error("protocol error; invalid argument count {0:?}")]
    InvalidLength(String),
    #[error("protocol error; expected '$', got {0:?}")]
    MissingBulkMarker(char),
    #[error("protocol error; invalid UTF-8 string")]
    InvalidUtf8,
}

/// One decoded command invocation: the command name followed by its arguments.
///
/// Requests are framed as `*<argc>\r\n` followed by `argc` pairs of lines, a `$<len>\r\n` header
/// and the argument text. Arguments are read up to the end of their line, the length in the
/// header is not used. Every argument is lower-cased, so keys and values are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    parts: Vec<String>,
}

impl Request {
    pub fn new(parts: Vec<String>) -> Request {
        Request { parts }
    }

    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Request, Error> {
        let header = get_line(src)?;
        let count = match header.split_first() {
            Some((&ARRAY_MARKER, count)) => parse_count(count)?,
            Some((&byte, _)) => return Err(Error::MissingArrayMarker(char::from(byte))),
            None => return Err(Error::MissingArrayMarker('\n')),
        };

        let mut parts = Vec::with_capacity(count.min(MAX_PREALLOCATED_ARGS));
        for _ in 0..count {
            match get_line(src)?.first() {
                Some(&BULK_MARKER) => {}
                Some(&byte) => return Err(Error::MissingBulkMarker(char::from(byte))),
                None => return Err(Error::MissingBulkMarker('\n')),
            }

            let text = get_line(src)?;
            let text = std::str::from_utf8(text).map_err(|_| Error::InvalidUtf8)?;
            parts.push(text.to_lowercase());
        }

        Ok(Request { parts })
    }

    pub fn into_parts(self) -> Vec<String> {
        self.parts
    }
}

impl<S: Into<String>> FromIterator<S> for Request {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Request::new(iter.into_iter().map(Into::into).collect())
    }
}

fn parse_count(src: &[u8]) -> Result<usize, Error> {
    let text = std::str::from_utf8(src).map_err(|_| Error::InvalidUtf8)?;
    text.parse::<usize>()
        .map_err(|_| Error::InvalidLength(text.to_string()))
}

/// Returns the next line without its `\n` terminator or any trailing `\r`, and moves the cursor
/// past it.
fn get_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], Error> {
    if !src.has_remaining() {
        return Err(Error::Incomplete);
    }

    let start = src.position() as usize;
    let buf: &'a [u8] = *src.get_ref();

    let newline = buf[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|index| start + index)
        .ok_or(Error::Incomplete)?;

    src.set_position((newline + 1) as u64);

    let mut line = &buf[start..newline];
    while let Some(rest) = line.strip_suffix(b"\r") {
        line = rest;
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Result<Request, Error> {
        let mut cursor = Cursor::new(data);
        Request::parse(&mut cursor)
    }

    #[test]
    fn parse_request() {
        let request = parse(b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n").unwrap();

        assert_eq!(request, Request::from_iter(["set", "foo", "bar"]));
    }

    #[test]
    fn parse_advances_cursor_past_one_request() {
        let data = b"*1\r\n$4\r\nPING\r\n*1\r\n$6\r\nDBSIZE\r\n";
        let mut cursor = Cursor::new(&data[..]);

        let first = Request::parse(&mut cursor).unwrap();
        assert_eq!(first.into_parts(), ["ping"]);
        assert_eq!(cursor.position(), 14);

        let second = Request::parse(&mut cursor).unwrap();
        assert_eq!(second.into_parts(), ["dbsize"]);
    }

    #[test]
    fn parse_accepts_bare_newlines() {
        let request = parse(b"*2\n$3\nget\n$3\nfoo\n").unwrap();

        assert_eq!(request.into_parts(), ["get", "foo"]);
    }

    #[test]
    fn parse_strips_every_trailing_carriage_return() {
        let request = parse(b"*2\r\n$3\r\nget\r\r\n$3\r\nfoo\r\r\r\n").unwrap();

        assert_eq!(request.into_parts(), ["get", "foo"]);
    }

    #[test]
    fn parse_ignores_bulk_length() {
        let request = parse(b"*2\r\n$99\r\necho\r\n$\r\nhello world\r\n").unwrap();

        assert_eq!(request.into_parts(), ["echo", "hello world"]);
    }

    #[test]
    fn parse_lowercases_every_argument() {
        let request = parse(b"*3\r\n$3\r\nSet\r\n$3\r\nKey\r\n$5\r\nVALUE\r\n").unwrap();

        assert_eq!(request.into_parts(), ["set", "key", "value"]);
    }

    #[test]
    fn parse_empty_argument() {
        let request = parse(b"*3\r\n$6\r\nappend\r\n$1\r\nk\r\n$0\r\n\r\n").unwrap();
        assert_eq!(request.into_parts(), ["append", "k", ""]);
    }

    #[test]
    fn parse_zero_arguments() {
        let request = parse(b"*0\r\n").unwrap();

        assert!(request.into_parts().is_empty());
    }

    #[test]
    fn parse_incomplete() {
        assert_eq!(parse(b""), Err(Error::Incomplete));
        assert_eq!(parse(b"*2"), Err(Error::Incomplete));
        assert_eq!(parse(b"*2\r\n$3\r\nget\r\n"), Err(Error::Incomplete));
        assert_eq!(parse(b"*2\r\n$3\r\nget\r\n$3\r\nfo"), Err(Error::Incomplete));
    }

    #[test]
    fn parse_missing_array_marker() {
        assert_eq!(
            parse(b"PING\r\n"),
            Err(Error::MissingArrayMarker('P'))
        );
        assert_eq!(parse(b"\r\n"), Err(Error::MissingArrayMarker('\n')));
    }

    #[test]
    fn parse_invalid_count() {
        assert_eq!(
            parse(b"*two\r\n"),
            Err(Error::InvalidLength("two".to_string()))
        );
        assert_eq!(
            parse(b"*-1\r\n"),
            Err(Error::InvalidLength("-1".to_string()))
        );
        assert_eq!(parse(b"*\r\n"), Err(Error::InvalidLength("".to_string())));
    }

    #[test]
    fn parse_missing_bulk_marker() {
        assert_eq!(
            parse(b"*1\r\n+PING\r\n"),
            Err(Error::MissingBulkMarker('+'))
        );
    }

    #[test]
    fn parse_invalid_utf8() {
        assert_eq!(
            parse(b"*1\r\n$2\r\n\xff\xfe\r\n"),
            Err(Error::InvalidUtf8)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::MissingArrayMarker('P').to_string(),
            "protocol error; expected '*', got 'P'"
        );
        assert_eq!(
            Error::InvalidLength("x".to_string()).to_string(),
            "protocol error; invalid argument count \"x\""
        );
    }
}
