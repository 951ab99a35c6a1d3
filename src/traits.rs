use bytes::Bytes;

use crate::Error;

pub trait Load {
    /// # Errors
    fn load(&self) -> Result<Bytes, Error>;

    fn is_empty(&self) -> bool { matches!(self.load(), Ok(data) if data.is_empty()) }
}

pub trait Store {
    /// # Errors
    fn store(&self, data: Bytes) -> Result<(), Error>;
}

pub trait LoadExt: Load {
    /// # Errors
    fn load_string(&self) -> Result<String, Error> {
        self.load().map(|data| String::from_utf8_lossy(&data).into_owned())
    }
}

impl<C: Load + ?Sized> LoadExt for C {}

pub trait StoreExt: Store {
    /// # Errors
    fn store_str(&self, data: &str) -> Result<(), Error> {
        self.store(Bytes::copy_from_slice(data.as_bytes()))
    }
}

impl<C: Store + ?Sized> StoreExt for C {}
