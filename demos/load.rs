use clipbox::{Clipboard, ClipboardLoadExt, Error};
use snafu::ErrorCompat;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let clipboard = new_clipboard()?;
    match clipboard.load_string() {
        Ok(text) if text.is_empty() => {
            println!("clipboard is empty");
            Ok(())
        }
        Ok(text) => {
            println!("size: {}", text.len());
            println!("data: \"{text}\"");
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(backtrace) = ErrorCompat::backtrace(&err) {
                eprintln!("{backtrace}");
            }
            Err(err)
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
fn new_clipboard() -> Result<Clipboard, Error> { Clipboard::new(None) }

#[cfg(windows)]
fn new_clipboard() -> Result<Clipboard, Error> { Clipboard::new() }
