//! Single-shot event source: one envelope from a reader.

use notification::{Dispatcher, NotificationHandler, Outcome};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::ListenerError;

/// Reads one envelope to the end of `reader` and handles it.
pub struct SingleShotEventSource<R> {
    reader: R,
}

impl<R> SingleShotEventSource<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub async fn run<D: Dispatcher>(
        mut self,
        handler: &NotificationHandler<D>,
    ) -> Result<Outcome, ListenerError> {
        let mut body = Vec::new();
        self.reader
            .read_to_end(&mut body)
            .await
            .map_err(ListenerError::Read)?;
        debug!(bytes = body.len(), "Read notification envelope");

        Ok(handler.handle_slice(&body).await?)
    }
}
