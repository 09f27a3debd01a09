use futures::StreamExt;
use std::net::SocketAddr;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::FramedRead;
use uuid::Uuid;

use crate::codec::{self, RequestCodec};
use crate::frame::Frame;
use crate::request::Request;

pub struct Connection {
    pub id: Uuid,
    pub client_address: SocketAddr,
    // Data is read from the socket into the codec's buffer. When a request is parsed, the
    // corresponding data is removed from the buffer.
    reader: FramedRead<OwnedReadHalf, RequestCodec>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl Connection {
    pub fn new(stream: TcpStream, client_address: SocketAddr, max_frame_size: usize) -> Connection {
        let (reader, writer) = stream.into_split();

        Connection {
            id: Uuid::new_v4(),
            client_address,
            reader: FramedRead::new(reader, RequestCodec::new(max_frame_size)),
            writer: BufWriter::new(writer),
        }
    }

    /// Reads the next request. `None` means the peer closed the connection cleanly, between two
    /// requests.
    pub async fn read_request(&mut self) -> Result<Option<Request>, codec::Error> {
        self.reader.next().await.transpose()
    }

    pub async fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.writer.write_all(&frame.serialize()).await?;
        self.writer.flush().await
    }
}
