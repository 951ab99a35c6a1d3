use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[cfg(all(
        unix,
        not(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "android",
            target_os = "emscripten"
        ))
    ))]
    #[snafu(display("{error}"))]
    X11 { error: crate::x11::Error },

    #[cfg(windows)]
    #[snafu(display("{error}"))]
    Windows { error: crate::windows::Error },

    #[snafu(display("Primitive was poisoned"))]
    PrimitivePoisoned,
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
impl From<crate::x11::Error> for Error {
    fn from(error: crate::x11::Error) -> Self { Self::X11 { error } }
}

#[cfg(windows)]
impl From<crate::windows::Error> for Error {
    fn from(error: crate::windows::Error) -> Self { Self::Windows { error } }
}
