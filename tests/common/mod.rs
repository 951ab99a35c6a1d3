use std::time::Duration;

use bytes::Bytes;
use clipbox::{ClipboardLoad, ClipboardStore, Error};
use rand::Rng;

pub const SMALL_TEXT_SIZE: usize = 100;
pub const LARGE_TEXT_SIZE: usize = 10_000;

const DISPLAYABLE_CHARACTERS: [char; 67] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L',
    'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', '0', '#', '$', '&', '@',
];

pub fn random_displayable_text(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| DISPLAYABLE_CHARACTERS[rng.gen_range(0..DISPLAYABLE_CHARACTERS.len())]).collect()
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

pub trait ClipboardTester {
    type Clipboard: ClipboardLoad + ClipboardStore;

    /// A fresh handle onto the same session clipboard. Separate handles act
    /// like separate processes competing for the same selection.
    ///
    /// # Errors
    fn new_clipboard(&self) -> Result<Self::Clipboard, Error>;

    /// # Errors
    fn run(&self) -> Result<(), Error> {
        self.test_round_trip(random_displayable_text(SMALL_TEXT_SIZE).into_bytes())?;
        self.test_round_trip(random_displayable_text(LARGE_TEXT_SIZE).into_bytes())?;
        self.test_round_trip(b"a\0b".to_vec())?;
        self.test_owner_fast_path()?;
        self.test_owned_but_empty()?;
        Ok(())
    }

    /// Publish through one handle, read back through another, so the data
    /// travels the full request/response path instead of the owner's
    /// internal buffer.
    fn test_round_trip(&self, payload: Vec<u8>) -> Result<(), Error> {
        let owner = self.new_clipboard()?;
        owner.store(Bytes::from(payload.clone()))?;

        let reader = self.new_clipboard()?;
        let mut pasted = reader.load()?;
        for _ in 0..4 {
            // ownership may not have settled yet right after the store
            if !pasted.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(100));
            pasted = reader.load()?;
        }

        assert_eq!(pasted.len(), payload.len());
        assert_eq!(&pasted[..], &payload[..]);
        drop(owner);
        Ok(())
    }

    /// The publishing handle reads its own buffer back without a round trip.
    fn test_owner_fast_path(&self) -> Result<(), Error> {
        let payload = random_displayable_text(SMALL_TEXT_SIZE).into_bytes();
        let clipboard = self.new_clipboard()?;
        clipboard.store(Bytes::from(payload.clone()))?;

        let pasted = clipboard.load()?;
        assert_eq!(&pasted[..], &payload[..]);
        Ok(())
    }

    /// An empty payload is a legitimate "owned but empty" state.
    fn test_owned_but_empty(&self) -> Result<(), Error> {
        let owner = self.new_clipboard()?;
        owner.store(Bytes::new())?;

        let reader = self.new_clipboard()?;
        assert!(reader.load()?.is_empty());
        drop(owner);
        Ok(())
    }
}
