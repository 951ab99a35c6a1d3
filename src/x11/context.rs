use std::os::{fd::AsRawFd, unix::prelude::RawFd};

use snafu::ResultExt;
use x11rb::{
    connection::Connection,
    protocol::{xproto, xproto::ConnectionExt as _, Event},
    rust_connection::RustConnection,
    wrapper::ConnectionExt as _,
};

use crate::x11::{error, Error};

/// Text formats this crate is willing to serve, highest priority first. The
/// first entry is also the format requested when reading a remote owner.
const SUPPORTED_TEXT_FORMATS: [&str; 7] = [
    "UTF8_STRING",
    "text/plain;charset=utf-8",
    "text/plain;charset=UTF-8",
    "GTK_TEXT_BUFFER_CONTENTS",
    "STRING",
    "TEXT",
    "text/plain",
];

/// Property on our own anchor window where remote owners deposit converted
/// selection data.
const TRANSFER_PROPERTY: &str = "CLIPBOX_BUFFER";

#[derive(Debug)]
pub struct Context {
    connection: RustConnection,
    window: xproto::Window,
    atom_cache: AtomCache,
}

impl Context {
    pub fn new(display_name: Option<&str>) -> Result<Self, Error> {
        let (connection, window) = new_connection(display_name)?;
        let atom_cache = AtomCache::new(&connection)?;
        Ok(Self { connection, window, atom_cache })
    }

    #[inline]
    pub fn poll_for_event(&self) -> Result<Option<Event>, Error> {
        self.connection.poll_for_event().context(error::PollForEventSnafu)
    }

    #[inline]
    pub const fn selection(&self) -> xproto::Atom { self.atom_cache.clipboard_selection }

    #[inline]
    pub fn classify(&self, target: xproto::Atom) -> RequestReply {
        self.atom_cache.classify(target)
    }

    /// Announce this window as the selection owner. Granting is not
    /// confirmed; the server notifies the previous owner instead.
    pub fn claim_ownership(&self) -> Result<(), Error> {
        drop(
            self.connection
                .set_selection_owner(
                    self.window,
                    self.atom_cache.clipboard_selection,
                    x11rb::CURRENT_TIME,
                )
                .context(error::ClaimSelectionOwnerSnafu)?,
        );
        self.flush()
    }

    /// Ask the current owner to convert the selection into our transfer
    /// property, using the highest-priority text format.
    pub fn request_transfer(&self) -> Result<(), Error> {
        drop(
            self.connection
                .convert_selection(
                    self.window,
                    self.atom_cache.clipboard_selection,
                    self.atom_cache.text_formats[0],
                    self.atom_cache.transfer_property,
                    x11rb::CURRENT_TIME,
                )
                .context(error::ConvertSelectionSnafu)?,
        );
        self.flush()
    }

    /// Read and delete whatever the owner deposited in our transfer property.
    pub fn take_transfer_property(&self) -> Result<Vec<u8>, Error> {
        let reply = self
            .connection
            .get_property(
                true,
                self.window,
                self.atom_cache.transfer_property,
                xproto::AtomEnum::ANY,
                0,
                u32::MAX,
            )
            .context(error::GetPropertySnafu)?
            .reply()
            .context(error::GetPropertyReplySnafu)?;
        Ok(reply.value)
    }

    pub fn serve_targets(&self, request: &xproto::SelectionRequestEvent) -> Result<(), Error> {
        drop(
            self.connection
                .change_property32(
                    xproto::PropMode::REPLACE,
                    request.requestor,
                    request.property,
                    xproto::AtomEnum::ATOM,
                    &self.atom_cache.advertised_targets,
                )
                .context(error::ChangePropertySnafu)?,
        );
        self.notify_requestor(request, request.property)
    }

    pub fn serve_data(
        &self,
        request: &xproto::SelectionRequestEvent,
        data: &[u8],
    ) -> Result<(), Error> {
        drop(
            self.connection
                .change_property8(
                    xproto::PropMode::REPLACE,
                    request.requestor,
                    request.property,
                    request.target,
                    data,
                )
                .context(error::ChangePropertySnafu)?,
        );
        self.notify_requestor(request, request.property)
    }

    /// Refuse a request for a format we do not provide. A notify carrying
    /// property `None` is the protocol-level refusal, not an error.
    pub fn decline(&self, request: &xproto::SelectionRequestEvent) -> Result<(), Error> {
        self.notify_requestor(request, x11rb::NONE)
    }

    fn notify_requestor(
        &self,
        request: &xproto::SelectionRequestEvent,
        property: xproto::Atom,
    ) -> Result<(), Error> {
        let notify = xproto::SelectionNotifyEvent {
            response_type: xproto::SELECTION_NOTIFY_EVENT,
            sequence: 0,
            time: request.time,
            requestor: request.requestor,
            selection: request.selection,
            target: request.target,
            property,
        };
        drop(
            self.connection
                .send_event(false, request.requestor, xproto::EventMask::NO_EVENT, notify)
                .context(error::SendEventSnafu)?,
        );
        self.flush()
    }

    /// Drops our protocol identity; the server revokes selection ownership
    /// held by the destroyed window.
    pub fn destroy_window(&self) -> Result<(), Error> {
        drop(self.connection.destroy_window(self.window).context(error::DestroyWindowSnafu)?);
        self.flush()
    }

    #[inline]
    fn flush(&self) -> Result<(), Error> {
        self.connection.flush().context(error::FlushConnectionSnafu)?;
        Ok(())
    }
}

impl AsRawFd for Context {
    fn as_raw_fd(&self) -> RawFd { self.connection.stream().as_raw_fd() }
}

/// How a peer's selection request is answered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequestReply {
    /// The meta-format: advertise the formats we serve.
    Targets,
    /// A text format we serve: hand out the copy buffer.
    Data,
    /// Anything else: protocol-level refusal.
    Decline,
}

#[derive(Debug)]
pub struct AtomCache {
    pub clipboard_selection: xproto::Atom,
    pub targets: xproto::Atom,
    pub transfer_property: xproto::Atom,
    pub text_formats: Vec<xproto::Atom>,
    pub advertised_targets: Vec<xproto::Atom>,
}

impl AtomCache {
    fn new(conn: &impl Connection) -> Result<Self, Error> {
        let clipboard_selection = get_intern_atom(conn, "CLIPBOARD")?;
        let targets = get_intern_atom(conn, "TARGETS")?;
        let transfer_property = get_intern_atom(conn, TRANSFER_PROPERTY)?;
        let text_formats = SUPPORTED_TEXT_FORMATS
            .iter()
            .map(|name| get_intern_atom(conn, name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut advertised_targets = Vec::with_capacity(text_formats.len() + 1);
        advertised_targets.push(targets);
        advertised_targets.extend_from_slice(&text_formats);

        Ok(Self { clipboard_selection, targets, transfer_property, text_formats, advertised_targets })
    }

    fn classify(&self, target: xproto::Atom) -> RequestReply {
        if target == self.targets {
            RequestReply::Targets
        } else if self.text_formats.contains(&target) {
            RequestReply::Data
        } else {
            RequestReply::Decline
        }
    }
}

#[inline]
pub fn get_intern_atom(conn: &impl Connection, atom_name: &str) -> Result<xproto::Atom, Error> {
    conn.intern_atom(false, atom_name.as_bytes())
        .with_context(|_| error::GetAtomIdentifierByNameSnafu { atom_name: atom_name.to_string() })?
        .reply()
        .map(|r| r.atom)
        .context(error::ReplySnafu)
}

fn new_connection(display_name: Option<&str>) -> Result<(RustConnection, xproto::Window), Error> {
    let (connection, screen_num) =
        RustConnection::connect(display_name).context(error::ConnectSnafu)?;

    let window = {
        let window = connection.generate_id().context(error::GenerateX11IdentifierSnafu)?;
        let screen = &connection.setup().roots[screen_num];

        drop(
            connection
                .create_window(
                    x11rb::COPY_DEPTH_FROM_PARENT,
                    window,
                    screen.root,
                    0,
                    0,
                    1,
                    1,
                    0,
                    xproto::WindowClass::INPUT_OUTPUT,
                    screen.root_visual,
                    &xproto::CreateWindowAux::default()
                        .event_mask(xproto::EventMask::PROPERTY_CHANGE),
                )
                .context(error::CreateWindowSnafu)?,
        );

        window
    };

    connection.flush().context(error::FlushConnectionSnafu)?;
    Ok((connection, window))
}

#[cfg(test)]
mod tests {
    use super::{AtomCache, RequestReply};

    fn cache() -> AtomCache {
        let text_formats = vec![11, 12, 13];
        let mut advertised_targets = vec![2];
        advertised_targets.extend_from_slice(&text_formats);
        AtomCache {
            clipboard_selection: 1,
            targets: 2,
            transfer_property: 3,
            text_formats,
            advertised_targets,
        }
    }

    #[test]
    fn targets_request_yields_format_listing() {
        assert_eq!(cache().classify(2), RequestReply::Targets);
    }

    #[test]
    fn supported_text_formats_are_served() {
        let cache = cache();
        for atom in [11, 12, 13] {
            assert_eq!(cache.classify(atom), RequestReply::Data);
        }
    }

    #[test]
    fn unknown_formats_are_declined() {
        let cache = cache();
        assert_eq!(cache.classify(99), RequestReply::Decline);
        assert_eq!(cache.classify(cache.transfer_property), RequestReply::Decline);
    }
}
