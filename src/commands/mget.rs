use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the values of all specified keys. For every key that does not exist, the nil bulk
/// string is returned in its place.
#[derive(Debug, PartialEq)]
pub struct Mget {
    pub keys: Vec<String>,
}

impl Executable for Mget {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let store = store.lock();
        let values = self
            .keys
            .iter()
            .map(|key| store.get(key).map(Frame::Bulk).unwrap_or(Frame::Null))
            .collect::<Vec<_>>();

        Ok(Frame::Array(values))
    }
}

impl TryFrom<&mut CommandParser> for Mget {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.remaining_strings()?;
        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::request::Request;
    use bytes::Bytes;

    #[test]
    fn existing_keys() {
        let store = Store::new();

        let cmd = Command::try_from(Request::from_iter(["MGET", "key1", "key2", "key3"])).unwrap();

        assert_eq!(
            cmd,
            Command::Mget(Mget {
                keys: vec![
                    String::from("key1"),
                    String::from("key2"),
                    String::from("key3")
                ]
            })
        );

        {
            let mut store = store.lock();
            store.set(String::from("key1"), Bytes::from("1"));
            store.set(String::from("key2"), Bytes::from("2"));
            store.set(String::from("key3"), Bytes::from("3"));
        }

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(
            res,
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("1")),
                Frame::Bulk(Bytes::from("2")),
                Frame::Bulk(Bytes::from("3"))
            ])
        );
    }

    #[test]
    fn mixed_keys() {
        let store = Store::new();

        let cmd = Command::try_from(Request::from_iter(["MGET", "key1", "key2", "key3"])).unwrap();

        {
            let mut store = store.lock();
            store.set(String::from("key1"), Bytes::from("1"));
            store.set(String::from("key3"), Bytes::from("3"));
        }

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(
            res,
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("1")),
                Frame::Null,
                Frame::Bulk(Bytes::from("3"))
            ])
        );
    }

    #[test]
    fn no_keys() {
        let err = Command::try_from(Request::from_iter(["MGET"])).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: String::from("mget")
            }
        );
    }
}
