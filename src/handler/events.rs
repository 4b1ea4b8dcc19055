//! Event sources and SSE framing.
//!
//! An [`EventSource`] turns one run request into a lazy, ordered stream of
//! events. The handler is the stream's only consumer: it either frames each
//! event as SSE as soon as it is produced, or collects the whole stream into
//! a JSON array.

use crate::error::{Error, Result};
use crate::handler::types::RunContext;
use crate::protocol::{Event, RunAgentInput};
use actix_web::web::Bytes;
use futures::stream::{self, LocalBoxStream, StreamExt};
use tokio::sync::mpsc;

/// The ordered, single-consumer stream of events for one run.
///
/// The stream ends when the run is over. Dropping it tells the source the
/// client is gone.
pub type EventStream = LocalBoxStream<'static, Box<dyn Event>>;

/// Produces the events of an agent run.
///
/// One source is shared by every in-flight request, so implementations must
/// be safe for concurrent use. Closures with the matching signature are
/// sources too:
///
/// ```
/// use ag_ui_handler::{AgUiEvent, EventSource, RunAgentInput, RunContext};
/// use ag_ui_handler::handler::events::{self, EventStream};
///
/// let source = |ctx: RunContext, _input: RunAgentInput| -> EventStream {
///     events::from_iter(vec![
///         AgUiEvent::run_started(ctx.thread_id.clone(), ctx.run_id.clone()),
///         AgUiEvent::run_finished(ctx.thread_id, ctx.run_id),
///     ])
/// };
/// # fn assert_source(_: &impl EventSource) {}
/// # assert_source(&source);
/// ```
pub trait EventSource: Send + Sync {
    fn run(&self, ctx: RunContext, input: RunAgentInput) -> EventStream;
}

impl<F> EventSource for F
where
    F: Fn(RunContext, RunAgentInput) -> EventStream + Send + Sync,
{
    fn run(&self, ctx: RunContext, input: RunAgentInput) -> EventStream {
        self(ctx, input)
    }
}

/// Builds an event stream over an in-memory sequence.
pub fn from_iter<I>(events: I) -> EventStream
where
    I: IntoIterator,
    I::Item: Event + 'static,
    I::IntoIter: 'static,
{
    stream::iter(
        events
            .into_iter()
            .map(|event| Box::new(event) as Box<dyn Event>),
    )
    .boxed_local()
}

/// Sending half of [`event_channel`].
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Box<dyn Event + Send>>,
}

impl EventSender {
    /// Sends an event, waiting while the channel is full.
    ///
    /// Fails once the stream has been dropped, which happens when the client
    /// disconnects or a write to it fails.
    pub async fn send<E>(&self, event: E) -> Result<()>
    where
        E: Event + Send + 'static,
    {
        self.sender
            .send(Box::new(event))
            .await
            .map_err(|_| Error::Other("Event stream closed by consumer".to_string()))
    }

    /// Returns true once the consuming stream has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Creates a bounded channel whose receiving half is an [`EventStream`].
///
/// Lets a source produce events from a spawned task. The stream ends when
/// every [`EventSender`] has been dropped. A `capacity` of zero is treated
/// as one.
pub fn event_channel(capacity: usize) -> (EventSender, EventStream) {
    let (sender, mut receiver) = mpsc::channel::<Box<dyn Event + Send>>(capacity.max(1));

    let stream = async_stream::stream! {
        while let Some(event) = receiver.recv().await {
            yield event as Box<dyn Event>;
        }
        tracing::trace!("Event channel closed by all senders");
    };

    (EventSender { sender }, stream.boxed_local())
}

/// Encodes an event as one SSE frame: `data: <json>\n\n`.
///
/// The JSON is written compactly so a frame never spans more than one
/// `data:` line.
pub fn encode_sse_frame(event: &dyn Event) -> Result<Bytes> {
    let json = serde_json::to_string(&event.to_json()?)?;
    Ok(Bytes::from(format!("data: {}\n\n", json)))
}
