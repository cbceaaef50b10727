//! Mailbox pagination
//!
//! A folder is paged in two steps: the folder-message-ids endpoint returns
//! every message id in server order, then the messages endpoint is asked for
//! a slice of that list. Positions are always explicit `start`/`end` values
//! into the id list, there is no cursor kept between calls.

use crate::folder::Folder;
use crate::types::RawMessage;
use crate::{MailError, MailResult};
use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::ops::Range;
use tracing::debug;

/// The two mailbox endpoints pagination is built on
#[async_trait]
pub trait MailApi: Send + Sync {
    /// Every message id in `folder`, in server order
    async fn message_ids(&self, folder: Folder) -> MailResult<Vec<i64>>;

    /// Message records for `ids`, in the same order, in one request
    async fn messages(&self, ids: &[i64]) -> MailResult<Vec<RawMessage>>;
}

/// Requested slice of an id list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRange {
    /// The whole list
    All,
    /// `start..end`, clamped to the list when resolved
    Span { start: i64, end: i64 },
}

impl MessageRange {
    /// Build a range from signed bounds where `-1` means "everything".
    ///
    /// A `-1` in either position selects the whole list, not just an open
    /// bound on that side. Callers have relied on this since the first
    /// paging API, so it is kept.
    pub fn from_bounds(start: i64, end: i64) -> Self {
        if start == -1 || end == -1 {
            MessageRange::All
        } else {
            MessageRange::Span { start, end }
        }
    }

    /// Concrete index range into a list of `len` ids, `None` when empty
    pub fn resolve(self, len: usize) -> Option<Range<usize>> {
        match self {
            MessageRange::All => clamp(0, len, len),
            MessageRange::Span { start, end } => {
                let end = usize::try_from(end).ok()?;
                let start = usize::try_from(start.max(0)).ok()?;
                clamp(start, end, len)
            }
        }
    }
}

fn clamp(start: usize, end: usize, len: usize) -> Option<Range<usize>> {
    let end = end.min(len);
    (start < end).then_some(start..end)
}

/// Fetch one request's worth of messages for `ids[range]`
async fn fetch_range<A>(
    api: &A,
    ids: &[i64],
    range: Option<Range<usize>>,
) -> MailResult<Vec<RawMessage>>
where
    A: MailApi + ?Sized,
{
    match range {
        Some(range) => {
            debug!(
                "eklase: fetching messages {}..{} of {}",
                range.start,
                range.end,
                ids.len()
            );
            api.messages(&ids[range]).await
        }
        None => Ok(Vec::new()),
    }
}

/// Fetch the messages at positions `start..end` of `ids`.
///
/// Out-of-range bounds are clamped and an empty selection returns an empty
/// list without touching the network. See [`MessageRange::from_bounds`] for
/// how `-1` is treated.
pub async fn fetch_messages<A>(
    api: &A,
    ids: &[i64],
    start: i64,
    end: i64,
) -> MailResult<Vec<RawMessage>>
where
    A: MailApi + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let range = MessageRange::from_bounds(start, end).resolve(ids.len());
    fetch_range(api, ids, range).await
}

/// Fetch a single message by id
pub async fn fetch_message<A>(api: &A, id: i64) -> MailResult<RawMessage>
where
    A: MailApi + ?Sized,
{
    api.messages(&[id])
        .await?
        .into_iter()
        .next()
        .ok_or(MailError::MessageNotFound(id))
}

/// First page of `folder`: `amount` messages from position `start`, or
/// everything from `start` on when `amount` is `None`
pub async fn get_mail<A>(
    api: &A,
    folder: Folder,
    start: usize,
    amount: Option<usize>,
) -> MailResult<Vec<RawMessage>>
where
    A: MailApi + ?Sized,
{
    let ids = api.message_ids(folder).await?;
    let end = amount.map_or(ids.len(), |amount| start.saturating_add(amount));
    fetch_range(api, &ids, clamp(start, end, ids.len())).await
}

#[derive(Debug, Clone, Copy)]
struct ChunkPlan {
    folder: Folder,
    start: usize,
    amount: Option<usize>,
    chunk_size: usize,
}

impl ChunkPlan {
    fn end_for(&self, len: usize) -> usize {
        self.amount
            .map_or(len, |amount| self.start.saturating_add(amount))
            .min(len)
    }
}

enum ChunkState {
    Unresolved,
    Paging {
        ids: Vec<i64>,
        cursor: usize,
        end: usize,
    },
}

async fn next_chunk<A>(
    api: &A,
    plan: ChunkPlan,
    state: ChunkState,
) -> MailResult<Option<(Vec<RawMessage>, ChunkState)>>
where
    A: MailApi + ?Sized,
{
    let (ids, cursor, end) = match state {
        ChunkState::Unresolved => {
            let ids = api.message_ids(plan.folder).await?;
            let end = plan.end_for(ids.len());
            debug!(
                "eklase: streaming {} {}..{} in chunks of {}",
                plan.folder, plan.start, end, plan.chunk_size
            );
            (ids, plan.start, end)
        }
        ChunkState::Paging { ids, cursor, end } => (ids, cursor, end),
    };

    if cursor >= end {
        return Ok(None);
    }

    let chunk_end = cursor.saturating_add(plan.chunk_size).min(end);
    let chunk = fetch_range(api, &ids, Some(cursor..chunk_end)).await?;
    Ok(Some((
        chunk,
        ChunkState::Paging {
            ids,
            cursor: chunk_end,
            end,
        },
    )))
}

/// Lazily page through `folder` in chunks of `chunk_size` messages.
///
/// Nothing is requested until the stream is first polled; the id list is
/// then fetched once and each further poll issues exactly one messages
/// request. Dropping the stream early leaves the remaining chunks unfetched.
/// The stream ends after the first error.
pub fn stream_mail<'a, A>(
    api: &'a A,
    folder: Folder,
    start: usize,
    amount: Option<usize>,
    chunk_size: usize,
) -> MailResult<impl Stream<Item = MailResult<Vec<RawMessage>>> + 'a>
where
    A: MailApi + ?Sized,
{
    if chunk_size == 0 {
        return Err(MailError::InvalidChunkSize);
    }
    let plan = ChunkPlan {
        folder,
        start,
        amount,
        chunk_size,
    };
    Ok(stream::try_unfold(ChunkState::Unresolved, move |state| {
        next_chunk(api, plan, state)
    }))
}
