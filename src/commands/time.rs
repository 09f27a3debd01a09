use bytes::Bytes;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the current server time as a two items list: a Unix timestamp and the amount of
/// microseconds already elapsed in the current second.
#[derive(Debug, PartialEq)]
pub struct Time;

impl Executable for Time {
    fn exec(self, _store: Store) -> Result<Frame, Error> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?;

        Ok(Frame::Array(vec![
            Frame::Bulk(Bytes::from(now.as_secs().to_string())),
            Frame::Bulk(Bytes::from(now.subsec_micros().to_string())),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Time {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        parser.finish()?;
        Ok(Self)
    }
}
