use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Could not open clipboard, error: {source}"))]
    OpenClipboard { source: windows::core::Error, backtrace: snafu::Backtrace },

    #[snafu(display("Could not empty clipboard, error: {source}"))]
    EmptyClipboard { source: windows::core::Error, backtrace: snafu::Backtrace },

    #[snafu(display("Could not allocate clipboard buffer, error: {source}"))]
    AllocateBuffer { source: windows::core::Error, backtrace: snafu::Backtrace },

    #[snafu(display("Could not lock clipboard buffer"))]
    LockBuffer { backtrace: snafu::Backtrace },

    #[snafu(display("Could not hand buffer over to the clipboard, error: {source}"))]
    SetClipboardData { source: windows::core::Error, backtrace: snafu::Backtrace },
}
