//! Monitor implementation for PC/SC card and reader events

use pcsc::{Context, ReaderState, Scope, State};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::PcscError;
use crate::event::{CardEvent, CardEventHandler, CardEventSender, ReaderEvent};

/// How long a single status-change wait may block before the reader list is
/// refreshed. Readers that enumerate late (USB re-plug) are picked up at the
/// next slice.
const POLL_SLICE: Duration = Duration::from_secs(1);

/// Pause between polls once a slice returned without a new event
const POLL_PAUSE: Duration = Duration::from_millis(200);

/// Monitor for PC/SC reader and card events
#[allow(missing_debug_implementations)]
pub struct PcscMonitor {
    /// PC/SC context
    context: Context,
    /// Whether a background monitor is running
    running: Arc<Mutex<bool>>,
    /// Previously seen card states per reader (to avoid duplicate events)
    previous_states: Arc<Mutex<HashMap<String, (State, Vec<u8>)>>>,
}

impl PcscMonitor {
    /// Create a new monitor
    pub(crate) fn new(context: Context) -> Result<Self, PcscError> {
        Ok(Self {
            context,
            running: Arc::new(Mutex::new(false)),
            previous_states: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Create a new monitor with a dedicated context
    pub fn create() -> Result<Self, PcscError> {
        let context = Context::establish(Scope::User)?;
        Self::new(context)
    }

    /// Block until a card is placed on any reader, or the timeout elapses.
    ///
    /// A card already present when the wait starts is reported immediately.
    /// The reader list is re-enumerated once per poll slice, so readers that
    /// appear mid-wait are included.
    pub fn wait_for_card(&mut self, timeout: Duration) -> Result<CardEvent, PcscError> {
        debug!(?timeout, "Waiting for card");
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(PcscError::WaitTimeout);
            }

            let events = self.poll_card_events(remaining.min(POLL_SLICE))?;
            if let Some(inserted) = events
                .into_iter()
                .find(|e| matches!(e, CardEvent::Inserted { .. }))
            {
                return Ok(inserted);
            }

            thread::sleep(POLL_PAUSE.min(remaining));
        }
    }

    /// Wait for card events for at most one poll slice
    fn poll_card_events(&mut self, timeout: Duration) -> Result<Vec<CardEvent>, PcscError> {
        // Initialize with the PnP notification
        let mut reader_states = vec![ReaderState::new(pcsc::PNP_NOTIFICATION(), State::UNAWARE)];

        // Get the current readers
        let readers = self.context.list_readers_owned()?;
        for reader in readers {
            reader_states.push(ReaderState::new(reader, State::UNAWARE));
        }

        for rs in &mut reader_states {
            rs.sync_current_state();
        }

        // Wait for state changes
        match self.context.get_status_change(Some(timeout), &mut reader_states) {
            Ok(()) => {}
            // A timeout here just means nothing changed during the slice
            Err(pcsc::Error::Timeout) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }

        let mut previous_states = self.previous_states.lock().unwrap();
        Ok(Self::collect_events(&reader_states, &mut previous_states))
    }

    /// Diff reader states against the previously seen states
    fn collect_events(
        reader_states: &[ReaderState],
        previous_states: &mut HashMap<String, (State, Vec<u8>)>,
    ) -> Vec<CardEvent> {
        let mut events = Vec::new();

        for rs in reader_states {
            let name = rs.name().to_string_lossy().into_owned();
            let event_state = rs.event_state();

            // Skip the PnP notification pseudo-reader
            if name == pcsc::PNP_NOTIFICATION().to_string_lossy() {
                continue;
            }

            if event_state.contains(State::PRESENT) && !event_state.contains(State::EMPTY) {
                let atr = rs.atr().to_vec();

                // New insertion, or a different card than last seen
                let is_new_event = match previous_states.get(&name) {
                    Some((prev_state, prev_atr)) => {
                        !prev_state.contains(State::PRESENT) || *prev_atr != atr
                    }
                    None => true,
                };

                if is_new_event {
                    trace!(reader = %name, atr = %hex::encode(&atr), "Card inserted");
                    events.push(CardEvent::Inserted {
                        reader: name.clone(),
                        atr: atr.clone(),
                    });
                    previous_states.insert(name, (event_state, atr));
                }
            } else if event_state.contains(State::EMPTY) {
                let is_new_event = match previous_states.get(&name) {
                    Some((prev_state, _)) => prev_state.contains(State::PRESENT),
                    None => false, // Don't report removal if we never saw it present
                };

                if is_new_event {
                    events.push(CardEvent::Removed {
                        reader: name.clone(),
                    });
                    previous_states.insert(name, (event_state, Vec::new()));
                }
            }
        }

        events
    }

    /// Check for reader additions/removals since the last call
    pub fn check_reader_changes(&mut self) -> Result<Vec<ReaderEvent>, PcscError> {
        let mut events = Vec::new();
        let mut previous_states = self.previous_states.lock().unwrap();

        let current_readers = self.context.list_readers_owned()?;
        let current_names: Vec<String> = current_readers
            .iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect();

        // Find new readers
        for name in &current_names {
            if !previous_states.contains_key(name) {
                events.push(ReaderEvent::Added(name.clone()));
                previous_states.insert(name.clone(), (State::UNAWARE, Vec::new()));
            }
        }

        // Find removed readers
        let readers_to_remove: Vec<String> = previous_states
            .keys()
            .filter(|name| !current_names.contains(name))
            .cloned()
            .collect();

        for name in readers_to_remove {
            events.push(ReaderEvent::Removed(name.clone()));
            previous_states.remove(&name);
        }

        Ok(events)
    }

    /// Monitor for card events with a callback on a background thread
    pub fn monitor_cards<H>(&self, mut handler: H) -> Result<(), PcscError>
    where
        H: CardEventHandler + 'static,
    {
        let context = self.context.clone();
        let running = Arc::clone(&self.running);
        let previous_states = Arc::clone(&self.previous_states);

        {
            let mut running_guard = running.lock().unwrap();
            *running_guard = true;
        }

        thread::spawn(move || {
            loop {
                {
                    let running_guard = running.lock().unwrap();
                    if !*running_guard {
                        break;
                    }
                }

                let mut reader_states =
                    vec![ReaderState::new(pcsc::PNP_NOTIFICATION(), State::UNAWARE)];
                if let Ok(readers) = context.list_readers_owned() {
                    for reader in readers {
                        reader_states.push(ReaderState::new(reader, State::UNAWARE));
                    }
                }

                for rs in &mut reader_states {
                    rs.sync_current_state();
                }

                if let Ok(()) = context.get_status_change(Some(POLL_SLICE), &mut reader_states) {
                    let mut states = previous_states.lock().unwrap();
                    for event in Self::collect_events(&reader_states, &mut states) {
                        handler.handle_event(event);
                    }
                }

                // Small delay to prevent a tight loop
                thread::sleep(POLL_PAUSE);
            }
        });

        Ok(())
    }

    /// Monitor for card events using a channel
    pub fn monitor_cards_channel(&self, sender: CardEventSender) -> Result<(), PcscError> {
        self.monitor_cards(move |event| {
            let _ = sender.send(event);
        })
    }

    /// Stop background monitoring
    pub fn stop(&self) {
        let mut running_guard = self.running.lock().unwrap();
        *running_guard = false;
    }
}
