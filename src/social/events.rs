//! In-process fan-out of feed changes.
//!
//! Every mutation of posts, likes or comments publishes a [`FeedEvent`]
//! carrying the changed data, so subscribers can merge it into the list they
//! already hold. A subscriber that falls behind the channel capacity gets a
//! single `resync` event and should reload the feed once.

use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{debug, warn};
use uuid::Uuid;

use super::repo_types::{CommentView, FeedPost};

const CHANNEL_CAPACITY: usize = 256;
const KEEP_ALIVE: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    PostCreated { post: FeedPost },
    PostUpdated { post_id: Uuid, likes_count: i32 },
    PostDeleted { post_id: Uuid },
    CommentAdded { post_id: Uuid, comment: CommentView },
}

impl FeedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FeedEvent::PostCreated { .. } => "post_created",
            FeedEvent::PostUpdated { .. } => "post_updated",
            FeedEvent::PostDeleted { .. } => "post_deleted",
            FeedEvent::CommentAdded { .. } => "comment_added",
        }
    }
}

#[derive(Clone)]
pub struct FeedHub {
    tx: broadcast::Sender<FeedEvent>,
}

impl Default for FeedHub {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Sends to current subscribers; having none is fine.
    pub fn publish(&self, event: FeedEvent) {
        let name = event.name();
        match self.tx.send(event) {
            Ok(n) => debug!(event = name, subscribers = n, "feed event published"),
            Err(_) => debug!(event = name, "feed event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Stream of SSE frames for one subscriber.
pub fn event_stream(
    rx: broadcast::Receiver<FeedEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    BroadcastStream::new(rx).map(|item| Ok(to_sse(item)))
}

pub fn sse(hub: &FeedHub) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(event_stream(hub.subscribe()))
        .keep_alive(KeepAlive::new().interval(KEEP_ALIVE).text("keep-alive"))
}

fn to_sse(item: Result<FeedEvent, BroadcastStreamRecvError>) -> Event {
    match item {
        Ok(event) => match Event::default().event(event.name()).json_data(&event) {
            Ok(sse_event) => sse_event,
            Err(e) => {
                warn!(error = %e, "feed event serialization failed");
                resync()
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(skipped, "feed subscriber lagged");
            resync()
        }
    }
}

fn resync() -> Event {
    Event::default().event("resync").data("{}")
}
