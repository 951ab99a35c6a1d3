mod error;

use bytes::Bytes;
use snafu::ResultExt;
use windows::Win32::{
    Foundation::{HANDLE, HGLOBAL},
    System::{
        DataExchange::{
            CloseClipboard, EmptyClipboard, GetClipboardData, OpenClipboard, SetClipboardData,
        },
        Memory::{GlobalAlloc, GlobalFree, GlobalLock, GlobalSize, GlobalUnlock, GMEM_MOVEABLE},
        Ole::CF_TEXT,
    },
};

pub use self::error::Error;
use crate::{ClipboardLoad, ClipboardStore};

/// Handle to the host's single global clipboard. The host serializes all
/// clipboard access process-wide, so this backend is fully synchronous: no
/// worker thread and no ownership bookkeeping. Stored content is owned by the
/// host and outlives this handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clipboard;

impl Clipboard {
    /// # Errors
    pub fn new() -> Result<Self, crate::Error> {
        // probe one acquisition cycle so an unusable clipboard surfaces here
        drop(Acquired::new()?);
        Ok(Self)
    }
}

/// Scoped clipboard acquisition, released again on drop. Must not be held
/// across blocking calls.
struct Acquired;

impl Acquired {
    fn new() -> Result<Self, Error> {
        unsafe { OpenClipboard(None) }.context(error::OpenClipboardSnafu)?;
        Ok(Self)
    }
}

impl Drop for Acquired {
    fn drop(&mut self) {
        if let Err(err) = unsafe { CloseClipboard() } {
            tracing::warn!("Could not close clipboard, error: {err}");
        }
    }
}

impl ClipboardStore for Clipboard {
    /// Empties the clipboard and hands it a host-allocated `CF_TEXT` buffer
    /// holding the payload plus a terminator. Buffer ownership transfers to
    /// the host on success.
    fn store(&self, data: Bytes) -> Result<(), crate::Error> {
        let _acquired = Acquired::new()?;

        unsafe { EmptyClipboard() }.context(error::EmptyClipboardSnafu)?;

        let buffer = unsafe { GlobalAlloc(GMEM_MOVEABLE, data.len() + 1) }
            .context(error::AllocateBufferSnafu)?;

        unsafe {
            let ptr = GlobalLock(buffer);
            if ptr.is_null() {
                drop(GlobalFree(buffer));
                return Err(error::LockBufferSnafu.build().into());
            }
            std::ptr::copy_nonoverlapping(data.as_ptr(), ptr.cast::<u8>(), data.len());
            ptr.cast::<u8>().add(data.len()).write(0);
            let _unused = GlobalUnlock(buffer);
        }

        let handed_over = unsafe { SetClipboardData(u32::from(CF_TEXT.0), HANDLE(buffer.0)) };
        if handed_over.is_err() {
            drop(unsafe { GlobalFree(buffer) });
        }
        drop(handed_over.context(error::SetClipboardDataSnafu)?);

        Ok(())
    }
}

impl ClipboardLoad for Clipboard {
    /// Copies the host-owned `CF_TEXT` buffer out of the clipboard. Absent
    /// or non-text content yields an empty payload.
    fn load(&self) -> Result<Bytes, crate::Error> {
        let _acquired = Acquired::new()?;

        let Ok(handle) = (unsafe { GetClipboardData(u32::from(CF_TEXT.0)) }) else {
            return Ok(Bytes::new());
        };
        let buffer = HGLOBAL(handle.0);

        let mut bytes = unsafe {
            let ptr = GlobalLock(buffer);
            if ptr.is_null() {
                tracing::warn!("Could not lock host clipboard buffer");
                return Ok(Bytes::new());
            }
            let size = GlobalSize(buffer);
            let bytes = std::slice::from_raw_parts(ptr.cast::<u8>(), size).to_vec();
            let _unused = GlobalUnlock(buffer);
            bytes
        };

        // the block carries the terminator plus allocator rounding; anything
        // past the payload is zero
        while bytes.last() == Some(&0) {
            bytes.pop();
        }

        Ok(Bytes::from(bytes))
    }
}
