use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Renders the status line, headers and blank separator line.
pub fn serialize_head(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256);

    // Status line
    buf.put_slice(resp.version.as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.reason.as_bytes());
    buf.put_slice(b"\r\n");

    // Headers
    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    buf
}

/// Renders the full wire form. The body is appended untouched, so binary
/// content passes through byte-for-byte.
pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = serialize_head(resp);
    buf.reserve(resp.body.len());
    buf.put_slice(&resp.body);
    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    /// Writes only the status line and headers (HEAD requests).
    pub fn head_only(response: &Response) -> Self {
        Self {
            buffer: serialize_head(response).freeze(),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
