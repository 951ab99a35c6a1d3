mod common;

use clipbox::{Error, MockClipboard};

use self::common::{ClipboardTester, SMALL_TEXT_SIZE};

#[derive(Debug, Default)]
pub struct Tester {
    clipboard: MockClipboard,
}

impl ClipboardTester for Tester {
    type Clipboard = MockClipboard;

    fn new_clipboard(&self) -> Result<MockClipboard, Error> { Ok(self.clipboard.clone()) }
}

#[test]
fn test_mock() -> Result<(), Error> { Tester::default().run() }

#[test]
fn random_text_samples_are_pairwise_distinct() {
    let samples: Vec<_> =
        (0..5).map(|_| common::random_displayable_text(SMALL_TEXT_SIZE)).collect();
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn random_byte_samples_are_pairwise_distinct() {
    let samples: Vec<_> = (0..5).map(|_| common::random_bytes(SMALL_TEXT_SIZE)).collect();
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
