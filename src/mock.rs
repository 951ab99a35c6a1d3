use std::sync::{Arc, RwLock};

use bytes::Bytes;

use crate::{ClipboardLoad, ClipboardStore, Error};

/// In-memory stand-in for the system clipboard. Clones share one buffer, so
/// every clone behaves like a separate process attached to the same
/// clipboard. Useful for exercising callers without a display server.
#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    data: Arc<RwLock<Option<Bytes>>>,
}

impl Clipboard {
    #[inline]
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[inline]
    #[must_use]
    pub fn with_content(data: Bytes) -> Self {
        Self { data: Arc::new(RwLock::new(Some(data))) }
    }
}

impl ClipboardLoad for Clipboard {
    fn load(&self) -> Result<Bytes, Error> {
        self.data.read().map_or_else(
            |_| Err(Error::PrimitivePoisoned),
            |data| Ok(data.clone().unwrap_or_default()),
        )
    }
}

impl ClipboardStore for Clipboard {
    fn store(&self, data: Bytes) -> Result<(), Error> {
        match self.data.write() {
            Ok(mut slot) => {
                *slot = Some(data);
                Ok(())
            }
            Err(_err) => Err(Error::PrimitivePoisoned),
        }
    }
}
