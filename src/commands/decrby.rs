use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Decrements the number stored at key by `decrement`. A missing key starts at 0, so it ends up
/// holding the negated decrement.
#[derive(Debug, PartialEq)]
pub struct DecrBy {
    pub key: String,
    pub decrement: i64,
}

impl Executable for DecrBy {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let res = self
            .decrement
            .checked_neg()
            .ok_or_else(|| CommandParserError::NotAnInteger.to_string())
            .and_then(|increment| store.lock().incr_by(&self.key, increment));

        match res {
            Ok(value) => Ok(Frame::Integer(value)),
            Err(msg) => Ok(Frame::Error(msg)),
        }
    }
}

impl TryFrom<&mut CommandParser> for DecrBy {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let decrement = parser.next_integer()?;
        parser.finish()?;

        Ok(Self { key, decrement })
    }
}
