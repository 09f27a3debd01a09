use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Replies with the number of the given keys that exist. Keys are not modified.
#[derive(Debug, PartialEq)]
pub struct Touch {
    pub keys: Vec<String>,
}

impl Executable for Touch {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let store = store.lock();
        let count = self.keys.iter().filter(|key| store.exists(key)).count();

        Ok(Frame::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Touch {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining_strings()?;
        Ok(Self { keys })
    }
}
