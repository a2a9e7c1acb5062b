//! Playback coordinator
//!
//! Turns play/pause/next/stop commands into queue transitions plus calls
//! on the external [`PlaybackBackend`]. Entries are pulled from the queue
//! before the provider is asked to play them.
//!
//! No lock is held while awaiting the provider. Status and pending events
//! live behind a short-lived mutex; the queue has its own.

use crate::error::{CoordinatorError, Result};
use crate::events::JukeboxEvent;
use crate::queue::QueueStore;
use crate::volume::VolumePreference;
use jukebox_core::{
    KeyValueStore, PlaybackBackend, PlaybackFailure, PlayerStateUpdate, PlayerStatus, QueueEntry,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Notice shown when play is pressed with nothing queued
pub const EMPTY_QUEUE_NOTICE: &str = "No tracks in queue. Add some songs first!";

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 128;

/// What a play/pause press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Head of the queue started playing
    Started(Box<QueueEntry>),
    Paused,
    Resumed,
    /// Nothing current and nothing pending
    NothingToPlay,
}

impl ToggleOutcome {
    fn started(entry: QueueEntry) -> Self {
        Self::Started(Box::new(entry))
    }
}

#[derive(Debug, Default)]
struct CoordinatorState {
    status: PlayerStatus,
    last_state: Option<PlayerStateUpdate>,
    volume: VolumePreference,
    pending_events: VecDeque<JukeboxEvent>,
}

impl CoordinatorState {
    /// Queue an event for the feed
    ///
    /// Only the latest position update is kept, and the buffer never grows
    /// past [`MAX_PENDING_EVENTS`].
    fn push(&mut self, event: JukeboxEvent) {
        if matches!(event, JukeboxEvent::PositionUpdate { .. }) {
            self.pending_events
                .retain(|e| !matches!(e, JukeboxEvent::PositionUpdate { .. }));
        }

        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            debug!("Event feed full, dropping oldest event");
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(event);
    }
}

/// Drives playback of the shared queue
pub struct PlaybackCoordinator {
    queue: Arc<QueueStore>,
    backend: Arc<dyn PlaybackBackend>,
    storage: Arc<dyn KeyValueStore>,
    inner: Mutex<CoordinatorState>,
}

impl PlaybackCoordinator {
    /// Create a coordinator over `queue`
    ///
    /// The stored volume preference is loaded from `storage`; it is sent to
    /// the provider on the first [`set_volume`](Self::set_volume) or
    /// [`toggle_mute`](Self::toggle_mute).
    pub fn new(
        queue: Arc<QueueStore>,
        backend: Arc<dyn PlaybackBackend>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let volume = VolumePreference::load(storage.as_ref());

        Self {
            queue,
            backend,
            storage,
            inner: Mutex::new(CoordinatorState {
                volume,
                ..CoordinatorState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The queue this coordinator plays from
    pub fn queue(&self) -> &Arc<QueueStore> {
        &self.queue
    }

    /// Play/pause
    ///
    /// - nothing current, queue non-empty: pull the head and play it
    /// - something current: pause if playing, resume if paused, otherwise
    ///   start it from the beginning
    /// - nothing at all: emit a notice and do nothing
    ///
    /// # Errors
    ///
    /// Provider failures. A failed start keeps the pulled entry current
    /// (or re-queues it when configured) and leaves the status unchanged.
    pub async fn toggle(&self) -> Result<ToggleOutcome> {
        if let Some(current) = self.queue.current_entry() {
            match self.status() {
                PlayerStatus::Playing => {
                    self.backend.pause().await.map_err(|e| self.command_failed(e))?;
                    self.set_status(PlayerStatus::Paused);
                    debug!("Playback paused");
                    return Ok(ToggleOutcome::Paused);
                }
                PlayerStatus::Paused => {
                    self.backend.resume().await.map_err(|e| self.command_failed(e))?;
                    self.set_status(PlayerStatus::Playing);
                    debug!("Playback resumed");
                    return Ok(ToggleOutcome::Resumed);
                }
                // Restored after a restart, or a previous start failed
                PlayerStatus::Idle | PlayerStatus::Stopped => {
                    return self.start(current).await.map(ToggleOutcome::started);
                }
            }
        }

        match self.queue.pull_next() {
            Some(entry) => self.start(entry).await.map(ToggleOutcome::started),
            None => {
                self.notice(EMPTY_QUEUE_NOTICE);
                Ok(ToggleOutcome::NothingToPlay)
            }
        }
    }

    /// Skip to the head of the queue
    ///
    /// # Errors
    ///
    /// [`CoordinatorError::NoMoreTracks`] when nothing is pending; the
    /// current entry is left alone. Provider failures as for
    /// [`toggle`](Self::toggle).
    pub async fn advance(&self) -> Result<QueueEntry> {
        match self.queue.pull_next() {
            Some(entry) => self.start(entry).await,
            None => {
                let err = CoordinatorError::NoMoreTracks;
                self.notice(err.to_string());
                Err(err)
            }
        }
    }

    /// Stop playback and drop the current entry
    ///
    /// # Errors
    ///
    /// If the provider refuses, nothing changes.
    pub async fn stop(&self) -> Result<()> {
        self.backend.stop().await.map_err(|e| self.command_failed(e))?;

        self.queue.clear_current();

        let mut inner = self.lock();
        inner.status = PlayerStatus::Stopped;
        inner.last_state = None;
        inner.push(JukeboxEvent::StateChanged {
            state: PlayerStatus::Stopped,
        });

        info!("Playback stopped");
        Ok(())
    }

    /// Seek within the current track
    ///
    /// # Errors
    ///
    /// [`CoordinatorError::NothingPlaying`] without a current entry, or the
    /// provider's failure.
    pub async fn seek(&self, position_ms: u64) -> Result<()> {
        if !self.queue.has_current() {
            return Err(CoordinatorError::NothingPlaying);
        }

        self.backend
            .seek(position_ms)
            .await
            .map_err(|e| self.command_failed(e))?;

        debug!(position_ms, "Seeked");
        Ok(())
    }

    /// Set the volume (clamped to 0-100) and persist it
    ///
    /// Changing the level while muted updates the stored level without
    /// unmuting. Returns the resulting preference.
    ///
    /// # Errors
    ///
    /// The preference is saved even when the provider call fails.
    pub async fn set_volume(&self, level: u8) -> Result<VolumePreference> {
        let volume = {
            let mut inner = self.lock();
            inner.volume.set_level(level);
            inner.volume
        };

        self.apply_volume(volume).await
    }

    /// Mute, or restore the level from before muting
    ///
    /// # Errors
    ///
    /// As for [`set_volume`](Self::set_volume).
    pub async fn toggle_mute(&self) -> Result<VolumePreference> {
        let volume = {
            let mut inner = self.lock();
            inner.volume.toggle_mute();
            inner.volume
        };

        self.apply_volume(volume).await
    }

    async fn apply_volume(&self, volume: VolumePreference) -> Result<VolumePreference> {
        volume.save(self.storage.as_ref());
        self.push_event(JukeboxEvent::VolumeChanged {
            level: volume.level(),
            is_muted: volume.is_muted(),
        });

        self.backend
            .set_volume(volume.effective_level())
            .await
            .map_err(|e| self.command_failed(e))?;

        Ok(volume)
    }

    /// Record a state notification from the provider
    ///
    /// Updates the status to playing/paused while an entry is current.
    /// Notifications arriving with no current entry (late events after a
    /// stop) are recorded but do not change the status.
    pub fn handle_state_change(&self, update: PlayerStateUpdate) {
        let has_current = self.queue.has_current();
        let mut inner = self.lock();

        inner.push(JukeboxEvent::PositionUpdate {
            position_ms: update.position_ms,
            duration_ms: update.duration_ms,
        });

        if has_current {
            let status = if update.paused {
                PlayerStatus::Paused
            } else {
                PlayerStatus::Playing
            };
            if inner.status != status {
                inner.status = status;
                inner.push(JukeboxEvent::StateChanged { state: status });
            }
        }

        inner.last_state = Some(update);
    }

    pub fn status(&self) -> PlayerStatus {
        self.lock().status
    }

    /// Most recent provider notification
    pub fn last_state(&self) -> Option<PlayerStateUpdate> {
        self.lock().last_state.clone()
    }

    pub fn volume(&self) -> VolumePreference {
        self.lock().volume
    }

    /// Take all pending events
    pub fn drain_events(&self) -> Vec<JukeboxEvent> {
        std::mem::take(&mut self.lock().pending_events).into()
    }

    /// Announce a submission, withdrawal, or reset made on the queue
    pub fn queue_changed(&self) {
        let length = self.queue.len();
        self.push_event(JukeboxEvent::QueueChanged { length });
    }

    pub fn has_pending_events(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    async fn start(&self, entry: QueueEntry) -> Result<QueueEntry> {
        match self.backend.play_track_at(entry.uri(), 0).await {
            Ok(()) => {
                info!(id = %entry.id, track = %entry.track.name, user = %entry.submitted_by, "Now playing");

                let length = self.queue.len();
                let mut inner = self.lock();
                inner.status = PlayerStatus::Playing;
                inner.last_state = None;
                inner.push(JukeboxEvent::NowPlaying {
                    entry_id: entry.id.to_string(),
                    track_name: entry.track.name.clone(),
                    submitted_by: entry.submitted_by.to_string(),
                });
                inner.push(JukeboxEvent::QueueChanged { length });
                inner.push(JukeboxEvent::StateChanged {
                    state: PlayerStatus::Playing,
                });
                drop(inner);

                Ok(entry)
            }
            Err(source) => {
                warn!(id = %entry.id, error = %source, "Provider refused to play entry");

                let requeued = self.queue.config().requeue_on_playback_failure
                    && self.queue.requeue_front(&entry);

                let err = CoordinatorError::StartFailed {
                    track_name: entry.track.name.clone(),
                    entry: Box::new(entry),
                    requeued,
                    source,
                };
                self.push_event(JukeboxEvent::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn set_status(&self, status: PlayerStatus) {
        let mut inner = self.lock();
        if inner.status != status {
            inner.status = status;
            inner.push(JukeboxEvent::StateChanged { state: status });
        }
    }

    fn command_failed(&self, failure: PlaybackFailure) -> CoordinatorError {
        warn!(error = %failure, "Playback command failed");
        self.push_event(JukeboxEvent::Error {
            message: failure.to_string(),
        });
        CoordinatorError::Playback(failure)
    }

    fn notice(&self, message: impl Into<String>) {
        self.push_event(JukeboxEvent::Notice {
            message: message.into(),
        });
    }

    fn push_event(&self, event: JukeboxEvent) {
        self.lock().push(event);
    }
}

impl std::fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("PlaybackCoordinator")
            .field("status", &inner.status)
            .field("volume", &inner.volume)
            .finish_non_exhaustive()
    }
}
