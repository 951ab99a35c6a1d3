#![cfg(all(
    unix,
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_os = "emscripten"
    ))
))]

mod common;

use std::time::{Duration, Instant};

use clipbox::{Clipboard, ClipboardLoad, ClipboardStoreExt, Error};

use self::common::ClipboardTester;

#[derive(Debug, Default)]
pub struct Tester;

impl ClipboardTester for Tester {
    type Clipboard = Clipboard;

    fn new_clipboard(&self) -> Result<Clipboard, Error> { Clipboard::new(None) }
}

// One test function: the suite manipulates the session-wide selection, so
// the scenarios must not run on parallel test threads.
#[test]
fn test_x11() -> Result<(), Error> {
    if std::env::var_os("DISPLAY").is_none() {
        eprintln!("skipped: no X11 display available");
        return Ok(());
    }

    let tester = Tester;
    tester.run()?;
    ownership_is_lost_when_the_owner_drops()?;
    paste_without_an_owner_is_empty_and_bounded()?;
    Ok(())
}

/// No hand-off happens at teardown: once the owning instance is gone, its
/// content is gone with it.
fn ownership_is_lost_when_the_owner_drops() -> Result<(), Error> {
    {
        let owner = Clipboard::new(None)?;
        owner.store_str("vanishes with its owner")?;
    }

    let clipboard = Clipboard::new(None)?;
    assert!(clipboard.load()?.is_empty());
    Ok(())
}

fn paste_without_an_owner_is_empty_and_bounded() -> Result<(), Error> {
    {
        let owner = Clipboard::new(None)?;
        owner.store_str("also vanishes")?;
    }

    let clipboard = Clipboard::new(None)?;
    let started = Instant::now();
    let data = clipboard.load()?;
    let elapsed = started.elapsed();

    assert!(data.is_empty());
    // the 500ms transfer timeout plus polling slack
    assert!(elapsed < Duration::from_secs(2), "load took {elapsed:?}");
    Ok(())
}
