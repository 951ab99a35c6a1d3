use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use clipbox::{Clipboard, ClipboardStoreExt};
use snafu::ErrorCompat;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let clipboard = new_clipboard()?;
    let data = format!("{:?}", Instant::now());
    match clipboard.store_str(&data) {
        Ok(()) => {
            println!("Press Ctrl-C to stop providing text: {data}");
            println!("You can try to paste the text into another window");
            let term = Arc::new(AtomicBool::new(false));
            let _ = signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&term))?;
            let _ = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&term))?;

            while !term.load(Ordering::Relaxed) {
                std::thread::sleep(Duration::from_millis(100));
            }

            println!("Exit");
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(backtrace) = ErrorCompat::backtrace(&err) {
                eprintln!("{backtrace}");
            }
            Err(err)?
        }
    }
}

#[cfg(all(
    unix,
    not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_os = "emscripten"
    ))
))]
fn new_clipboard() -> Result<Clipboard, clipbox::Error> { Clipboard::new(None) }

#[cfg(windows)]
fn new_clipboard() -> Result<Clipboard, clipbox::Error> { Clipboard::new() }
