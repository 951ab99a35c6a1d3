mod error;
mod mock;
mod traits;

#[cfg(all(
    unix,
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_os = "emscripten"
    ))
))]
mod x11;

#[cfg(windows)]
mod windows;

#[cfg(all(
    unix,
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_os = "emscripten"
    ))
))]
pub use self::x11::{Clipboard, Error as X11Error};
#[cfg(windows)]
pub use self::windows::{Clipboard, Error as WindowsError};
pub use self::{
    error::Error,
    mock::Clipboard as MockClipboard,
    traits::{
        Load as ClipboardLoad, LoadExt as ClipboardLoadExt, Store as ClipboardStore,
        StoreExt as ClipboardStoreExt,
    },
};
