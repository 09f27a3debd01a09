use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Set key to hold the string value. If key already holds a value, it is overwritten.
///
/// `NX` only sets the key if it does not already exist, `XX` only if it already exists. When the
/// condition is not met nothing is written and the nil bulk string is returned.
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: String,
    pub value: Bytes,
    pub condition: Option<SetCondition>,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SetCondition {
    /// `NX`
    NotExists,
    /// `XX`
    Exists,
}

impl TryFrom<String> for SetCondition {
    type Error = CommandParserError;

    fn try_from(option: String) -> Result<Self, Self::Error> {
        match option.to_lowercase().as_str() {
            "nx" => Ok(SetCondition::NotExists),
            "xx" => Ok(SetCondition::Exists),
            _ => Err(CommandParserError::SyntaxError),
        }
    }
}

impl Executable for Set {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut store = store.lock();

        let allowed = match self.condition {
            None => true,
            Some(SetCondition::NotExists) => !store.exists(&self.key),
            Some(SetCondition::Exists) => store.exists(&self.key),
        };

        if !allowed {
            return Ok(Frame::Null);
        }

        store.set(self.key, self.value);

        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        let condition = match parser.next_string() {
            Ok(option) => Some(SetCondition::try_from(option)?),
            Err(CommandParserError::EndOfStream) => None,
            Err(err) => return Err(err),
        };
        parser.finish()?;

        Ok(Self {
            key,
            value,
            condition,
        })
    }
}
