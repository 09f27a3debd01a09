use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Renames `key` to `newkey`. If `newkey` already exists it is overwritten. Replies with an error
/// when `key` does not exist.
#[derive(Debug, PartialEq)]
pub struct Rename {
    pub key: String,
    pub newkey: String,
}

impl Executable for Rename {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let renamed = store.lock().rename(&self.key, &self.newkey);

        if renamed {
            Ok(Frame::ok())
        } else {
            Ok(Frame::Error("no such key".to_string()))
        }
    }
}

impl TryFrom<&mut CommandParser> for Rename {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let newkey = parser.next_string()?;
        parser.finish()?;

        Ok(Self { key, newkey })
    }
}
