use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Sets the given keys to their respective values. Replaces existing values with new values.
///
/// The pairs are validated when the command is parsed, so an odd number of arguments is rejected
/// before any key is written.
#[derive(Debug, PartialEq)]
pub struct Mset {
    pub pairs: Vec<(String, Bytes)>,
}

impl Executable for Mset {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut store = store.lock();

        for (key, value) in self.pairs {
            store.set(key, value);
        }

        Ok(Frame::ok())
    }
}

impl TryFrom<&mut CommandParser> for Mset {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let args = parser.remaining_strings()?;
        if args.len() % 2 != 0 {
            return Err(CommandParserError::EndOfStream);
        }

        let mut args = args.into_iter();
        let mut pairs = Vec::with_capacity(args.len() / 2);
        while let (Some(key), Some(value)) = (args.next(), args.next()) {
            pairs.push((key, Bytes::from(value)));
        }

        Ok(Self { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{execute, Command};
    use crate::request::Request;

    #[test]
    fn insert_one() {
        let store = Store::new();

        let cmd = Command::try_from(Request::from_iter(["MSET", "key1", "value1"])).unwrap();

        assert_eq!(
            cmd,
            Command::Mset(Mset {
                pairs: vec![(String::from("key1"), Bytes::from("value1"))]
            })
        );

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::ok());
        assert_eq!(store.lock().get("key1"), Some(Bytes::from("value1")));
    }

    #[test]
    fn insert_many() {
        let store = Store::new();

        let cmd = Command::try_from(Request::from_iter([
            "MSET", "key1", "value1", "key2", "value2", "key3", "value3",
        ]))
        .unwrap();

        assert_eq!(
            cmd,
            Command::Mset(Mset {
                pairs: vec![
                    (String::from("key1"), Bytes::from("value1")),
                    (String::from("key2"), Bytes::from("value2")),
                    (String::from("key3"), Bytes::from("value3"))
                ]
            })
        );

        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::ok());
        assert_eq!(store.lock().get("key1"), Some(Bytes::from("value1")));
        assert_eq!(store.lock().get("key2"), Some(Bytes::from("value2")));
        assert_eq!(store.lock().get("key3"), Some(Bytes::from("value3")));
    }

    #[test]
    fn override_existing() {
        let store = Store::new();
        store.lock().set(String::from("key1"), Bytes::from("1"));

        let cmd = Command::try_from(Request::from_iter(["MSET", "key1", "value1"])).unwrap();
        let res = cmd.exec(store.clone()).unwrap();

        assert_eq!(res, Frame::ok());
        assert_eq!(store.lock().get("key1"), Some(Bytes::from("value1")));
    }

    #[test]
    fn no_keys() {
        let err = Command::try_from(Request::from_iter(["MSET"])).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: String::from("mset")
            }
        );
    }

    #[test]
    fn odd_arguments_write_nothing() {
        let store = Store::new();

        let res = execute(
            Request::from_iter(["MSET", "key1", "value1", "key2"]),
            &store,
        );

        assert_eq!(
            res,
            Frame::Error("wrong number of arguments for 'mset' command".to_string())
        );
        assert_eq!(store.lock().size(), 0);
    }
}
