use bytes::{Bytes, BytesMut};

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// If key already exists, this command appends the value at the end of the string. If key does
/// not exist it is created and set as an empty string, so APPEND will be similar to SET in this
/// special case.
#[derive(Debug, PartialEq)]
pub struct Append {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Append {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut store = store.lock();

        let len = match store.get(&self.key) {
            Some(bytes) => {
                let new_len = bytes.len() + self.value.len();
                let mut new_value = BytesMut::with_capacity(new_len);

                new_value.extend_from_slice(&bytes);
                new_value.extend_from_slice(&self.value);

                store.set(self.key, new_value.freeze());
                new_len
            }
            None => {
                let len = self.value.len();
                store.set(self.key, self.value);
                len
            }
        };

        Ok(Frame::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Append {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;
        parser.finish()?;

        Ok(Self { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::request::Request;

    #[test]
    fn when_key_does_not_exists() {
        let store = Store::new();

        let cmd = Command::try_from(Request::from_iter(["APPEND", "foo", "baz"])).unwrap();

        assert_eq!(
            cmd,
            Command::Append(Append {
                key: String::from("foo"),
                value: Bytes::from("baz")
            })
        );

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::Integer(3));
        assert_eq!(store.lock().get("foo"), Some(Bytes::from("baz")));
    }

    #[test]
    fn when_key_exists() {
        let store = Store::new();

        let cmd = Command::try_from(Request::from_iter(["APPEND", "key1", "world"])).unwrap();

        store
            .lock()
            .set(String::from("key1"), Bytes::from("hello"));

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::Integer(10));
        assert_eq!(store.lock().get("key1"), Some(Bytes::from("helloworld")));
    }

    #[test]
    fn wrong_number_of_arguments() {
        let err = Command::try_from(Request::from_iter(["APPEND", "key1"])).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: String::from("append")
            }
        );
    }
}
