//! Keeps an ordered list of message blocks in sync with a channel.
//!
//! The blocks should stay the newest messages of the channel. As long as the bot's own
//! messages at the bottom of the history line up with the desired blocks and only a few
//! foreign messages were posted after them, the blocks are edited in place (and the foreign
//! messages optionally deleted). Otherwise every own message is deleted and the blocks are
//! sent again so they end up at the bottom.

use futures::future::join_all;

use crate::server::{
    error::AppError,
    model::{discord::ChannelMessage, panel::MessageBlock},
    service::discord::DiscordTransport,
};

/// Number of recent messages inspected.
const HISTORY_LIMIT: u8 = 25;

/// Which path a reconcile took and how many requests it issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Edited { edits: usize, deleted_foreign: usize },
    Resent { deleted: usize, sent: usize },
}

/// Result of scanning the channel history.
struct HistoryScan {
    /// Own messages to edit, oldest first. Only meaningful in modify mode.
    candidates: Vec<ChannelMessage>,
    own: Vec<ChannelMessage>,
    foreign_to_delete: Vec<ChannelMessage>,
    modify: bool,
}

fn scan_history(
    history: Vec<ChannelMessage>,
    bot_id: u64,
    desired_len: usize,
    tolerance: usize,
    delete_foreign: bool,
) -> HistoryScan {
    let mut scan = HistoryScan {
        candidates: Vec::new(),
        own: Vec::new(),
        foreign_to_delete: Vec::new(),
        modify: true,
    };
    let mut tolerance_used = 0;

    for message in history {
        if message.author_id == bot_id {
            // Any foreign message older than an own message forces a resend
            tolerance_used = tolerance + 1;
            if scan.modify {
                scan.candidates.insert(0, message.clone());
            }
            scan.own.push(message);
            if scan.candidates.len() > desired_len {
                scan.modify = false;
                scan.candidates.clear();
            }
        } else {
            if scan.modify {
                tolerance_used += 1;
            }
            if delete_foreign && tolerance_used <= tolerance {
                scan.foreign_to_delete.push(message);
            }
            if scan.candidates.len() != desired_len && tolerance_used > tolerance {
                scan.modify = false;
                scan.candidates.clear();
            }
        }
    }

    if scan.candidates.len() != desired_len {
        scan.modify = false;
    }

    scan
}

/// Syncs `desired` into a channel, editing in place or wiping and resending.
///
/// # Arguments
/// - `transport` - Discord transport
/// - `bot_id` - Author id of the messages this bot owns
/// - `channel_id` - Channel to sync
/// - `desired` - Blocks in display order, oldest first
/// - `tolerance` - Foreign messages tolerated after the blocks before resending
/// - `delete_foreign` - Delete the tolerated foreign messages when editing in place
///
/// # Returns
/// - `Ok(ReconcileOutcome)` - Path taken; individual edit or delete failures are logged
/// - `Err(AppError::TransportErr)` - Reading the history or sending a block failed
pub async fn reconcile(
    transport: &dyn DiscordTransport,
    bot_id: u64,
    channel_id: u64,
    desired: &[MessageBlock],
    tolerance: usize,
    delete_foreign: bool,
) -> Result<ReconcileOutcome, AppError> {
    let history = transport.recent_messages(channel_id, HISTORY_LIMIT).await?;
    let scan = scan_history(history, bot_id, desired.len(), tolerance, delete_foreign);

    if scan.modify {
        let deletes = scan
            .foreign_to_delete
            .iter()
            .map(|message| transport.delete_message(channel_id, message.id));
        let edits: Vec<_> = scan
            .candidates
            .iter()
            .zip(desired)
            .filter(|(current, block)| {
                current.content != block.content || current.view != block.view.signature()
            })
            .map(|(current, block)| transport.edit_message(channel_id, current.id, block))
            .collect();

        let deleted_foreign = scan.foreign_to_delete.len();
        let edit_count = edits.len();
        let (delete_results, edit_results) = futures::join!(join_all(deletes), join_all(edits));

        for e in delete_results.into_iter().filter_map(Result::err) {
            tracing::warn!(
                "Failed to delete foreign message in channel {}: {}",
                channel_id,
                e
            );
        }
        for e in edit_results.into_iter().filter_map(Result::err) {
            tracing::warn!("Failed to edit message in channel {}: {}", channel_id, e);
        }

        if edit_count == 0 {
            tracing::debug!("Channel {} already up to date", channel_id);
        }

        return Ok(ReconcileOutcome::Edited {
            edits: edit_count,
            deleted_foreign,
        });
    }

    let deletes = scan
        .own
        .iter()
        .map(|message| transport.delete_message(channel_id, message.id));
    for e in join_all(deletes).await.into_iter().filter_map(Result::err) {
        tracing::warn!(
            "Failed to delete old message in channel {}: {}",
            channel_id,
            e
        );
    }

    for block in desired {
        transport.send_message(channel_id, block).await?;
    }

    tracing::debug!(
        "Resent {} messages in channel {} (deleted {})",
        desired.len(),
        channel_id,
        scan.own.len()
    );

    Ok(ReconcileOutcome::Resent {
        deleted: scan.own.len(),
        sent: desired.len(),
    })
}
