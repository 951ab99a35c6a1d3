mod context;
mod error;

use std::{
    os::fd::AsRawFd,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use bytes::Bytes;
use parking_lot::Mutex;
use snafu::ResultExt;
use x11rb::protocol::Event as X11Event;

use self::context::{Context, RequestReply};
pub use self::error::Error;
use crate::{ClipboardLoad, ClipboardStore};

const CONTEXT_TOKEN: mio::Token = mio::Token(0);

/// Cadence of the worker loop and of a `load` call blocked on a remote owner.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long `load` waits for the remote owner before settling on "no data".
const TRANSFER_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct State {
    /// Published payload; present exactly while this instance owns the
    /// selection (cleared once another client claims it).
    owned: Option<Bytes>,

    /// Answer to our outstanding conversion request, deposited by the worker.
    incoming: Option<Bytes>,

    /// A conversion request is in flight and unanswered. At most one transfer
    /// cycle runs at a time.
    awaiting_transfer: bool,
}

#[derive(Debug)]
pub struct Clipboard {
    context: Arc<Context>,
    state: Arc<Mutex<State>>,
    is_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<Result<(), Error>>>,
}

impl Clipboard {
    /// # Errors
    pub fn new(display_name: Option<&str>) -> Result<Self, crate::Error> {
        tracing::info!("Connect X11 server");
        let context = Arc::new(Context::new(display_name)?);
        tracing::info!("X11 server connected");

        let state = Arc::new(Mutex::new(State::default()));
        let is_running = Arc::new(AtomicBool::new(true));
        let thread = build_thread(is_running.clone(), context.clone(), state.clone());

        Ok(Self { context, state, is_running, thread: Some(thread) })
    }
}

impl ClipboardStore for Clipboard {
    /// Publishes the payload and announces ownership. The local buffer is
    /// replaced even when the announcement cannot be sent; peers are answered
    /// lazily by the worker from the then-current buffer.
    fn store(&self, data: Bytes) -> Result<(), crate::Error> {
        self.state.lock().owned = Some(data);
        self.context.claim_ownership()?;
        Ok(())
    }
}

impl ClipboardLoad for Clipboard {
    /// Returns the published payload directly when this instance is the
    /// owner; otherwise asks the current owner and waits up to 500 ms. An
    /// absent, refusing, or unresponsive owner all yield an empty payload,
    /// which is a normal outcome.
    fn load(&self) -> Result<Bytes, crate::Error> {
        {
            let mut state = self.state.lock();
            if let Some(data) = &state.owned {
                return Ok(data.clone());
            }

            state.incoming = None;
            state.awaiting_transfer = true;
            if let Err(err) = self.context.request_transfer() {
                tracing::warn!("Could not reach the selection owner, error: {err}");
                state.awaiting_transfer = false;
                return Ok(Bytes::new());
            }
        }

        let deadline = Instant::now() + TRANSFER_TIMEOUT;
        loop {
            thread::sleep(POLL_INTERVAL);

            let mut state = self.state.lock();
            if let Some(data) = state.incoming.take() {
                return Ok(data);
            }
            if Instant::now() >= deadline {
                state.awaiting_transfer = false;
                return Ok(Bytes::new());
            }
        }
    }
}

impl Drop for Clipboard {
    fn drop(&mut self) {
        self.is_running.store(false, Ordering::Release);

        tracing::debug!("Reap clipboard worker thread");
        drop(self.thread.take().map(thread::JoinHandle::join));

        // the server clears any ownership held by the destroyed window
        if let Err(err) = self.context.destroy_window() {
            tracing::warn!("Could not tear down X11 resources, error: {err}");
        }
    }
}

fn build_thread(
    is_running: Arc<AtomicBool>,
    context: Arc<Context>,
    state: Arc<Mutex<State>>,
) -> thread::JoinHandle<Result<(), Error>> {
    thread::spawn(move || {
        let mut poll = mio::Poll::new().context(error::InitializeMioPollSnafu)?;
        let mut events = mio::Events::with_capacity(128);

        poll.registry()
            .register(
                &mut mio::unix::SourceFd(&context.as_raw_fd()),
                CONTEXT_TOKEN,
                mio::Interest::READABLE,
            )
            .context(error::RegisterIoResourceSnafu)?;

        while is_running.load(Ordering::Relaxed) {
            tracing::trace!("Wait for readiness events");

            if let Err(err) = poll.poll(&mut events, Some(POLL_INTERVAL)) {
                tracing::error!("Error occurred while polling for readiness event, error: {err}");
            }

            // x11rb queues events internally, so readiness on the stream does
            // not map one-to-one onto protocol events; drain the queue
            loop {
                match context.poll_for_event() {
                    Ok(Some(event)) => dispatch(&context, &state, &event),
                    Ok(None) => break,
                    Err(err) => {
                        tracing::warn!("Lost the X11 event stream, error: {err}");
                        break;
                    }
                }
            }
        }

        Ok(())
    })
}

/// A single protocol event against the shared state. Must never panic or
/// bail: an unexpected or failing event is logged and swallowed.
fn dispatch(context: &Context, state: &Mutex<State>, event: &X11Event) {
    match event {
        // a peer wants our data
        X11Event::SelectionRequest(request) => {
            if request.selection != context.selection() {
                return;
            }
            let owned = state.lock().owned.clone();
            let Some(data) = owned else {
                // not the owner (anymore); the request is not ours to answer
                return;
            };

            let result = match context.classify(request.target) {
                RequestReply::Targets => context.serve_targets(request),
                RequestReply::Data => context.serve_data(request, &data),
                RequestReply::Decline => context.decline(request),
            };
            if let Err(err) = result {
                tracing::warn!("Could not answer selection request, error: {err}");
            }
        }

        // another client took ownership
        X11Event::SelectionClear(_) => {
            tracing::debug!("Selection ownership was taken by another client");
            state.lock().owned = None;
        }

        // answer to our own conversion request
        X11Event::SelectionNotify(notify) => {
            let mut state = state.lock();
            if !state.awaiting_transfer {
                return;
            }

            let payload = if notify.property == x11rb::NONE {
                // the owner refused the conversion
                Bytes::new()
            } else {
                match context.take_transfer_property() {
                    Ok(bytes) => Bytes::from(bytes),
                    Err(err) => {
                        tracing::warn!("Could not read transferred selection, error: {err}");
                        Bytes::new()
                    }
                }
            };
            state.incoming = Some(payload);
            state.awaiting_transfer = false;
        }

        _ => {}
    }
}
