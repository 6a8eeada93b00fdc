//! Collection session state machine.
//!
//! A session is either `Idle` or `Collecting`. While collecting it appends
//! every sample it is given, in arrival order, and mirrors the latest one.
//! Stopping always returns it to the initial empty state.
//!
//! Samples that arrive while idle are dropped without error: a fix that
//! lands just after the user pressed stop must not resurrect the session.
//!
//! There is no global instance. The application constructs one session and
//! shares it; tests construct as many as they like.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use walktrack_core::sample::{LocationEvent, LocationPoint};
use walktrack_core::validation::{validate_sample, ValidationError};

/// Session state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Not recording; holds no samples
    #[default]
    Idle,
    /// Recording samples
    Collecting,
}

/// Samples handed over by [`CollectionSession::finish`] for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSession {
    pub start_time: DateTime<Utc>,
    pub samples: Vec<LocationPoint>,
}

/// Serializable view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub start_time: Option<DateTime<Utc>>,
    pub sample_count: usize,
    pub current_sample: Option<LocationPoint>,
    pub current_speed: Option<f64>,
}

/// In-memory recording session
#[derive(Debug)]
pub struct CollectionSession<C = SystemClock> {
    clock: C,
    state: SessionState,
    start_time: Option<DateTime<Utc>>,
    samples: Vec<LocationPoint>,
    current_sample: Option<LocationPoint>,
    current_speed: Option<f64>,
}

impl CollectionSession<SystemClock> {
    /// Create new session in Idle state using wall-clock time
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CollectionSession<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CollectionSession<C> {
    /// Create new session in Idle state with an injected time source
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: SessionState::Idle,
            start_time: None,
            samples: Vec::new(),
            current_sample: None,
            current_speed: None,
        }
    }

    /// Transition to Collecting (Idle → Collecting)
    ///
    /// Starting while already collecting restarts the session: samples are
    /// discarded and the start time is re-stamped.
    pub fn start(&mut self) {
        if self.state == SessionState::Collecting {
            tracing::warn!(
                discarded = self.samples.len(),
                "Session restarted while collecting"
            );
        }

        self.clear();
        let now = self.clock.now();
        self.state = SessionState::Collecting;
        self.start_time = Some(now);

        tracing::debug!(start_time = %now, "Session started");
    }

    /// Transition to Idle, discarding everything collected
    pub fn stop(&mut self) {
        if self.state == SessionState::Collecting {
            tracing::debug!(samples = self.samples.len(), "Session stopped");
        }
        self.clear();
    }

    /// Same effect as [`stop`](Self::stop)
    pub fn reset(&mut self) {
        self.stop();
    }

    /// Append a sample while collecting
    ///
    /// Returns false, leaving the session untouched, when idle. The sample
    /// is not validated here; see [`record`](Self::record).
    pub fn add_sample(&mut self, sample: LocationPoint) -> bool {
        if self.state != SessionState::Collecting {
            tracing::trace!(timestamp = %sample.timestamp, "Dropped sample while idle");
            return false;
        }

        self.current_speed = sample.speed;
        self.current_sample = Some(sample.clone());
        self.samples.push(sample);
        true
    }

    /// Convert, validate and append a provider event
    ///
    /// Malformed events are errors regardless of state; well-formed events
    /// arriving while idle are dropped and reported as `Ok(false)`.
    pub fn record(&mut self, event: LocationEvent) -> Result<bool, ValidationError> {
        let sample = LocationPoint::try_from(event)?;
        validate_sample(&sample).into_result()?;
        Ok(self.add_sample(sample))
    }

    /// Hand over the collected samples and return to Idle
    ///
    /// Returns `None` when idle.
    pub fn finish(&mut self) -> Option<RecordedSession> {
        let start_time = self.start_time?;
        if self.state != SessionState::Collecting {
            return None;
        }

        let samples = std::mem::take(&mut self.samples);
        tracing::debug!(samples = samples.len(), "Session finished");
        self.clear();

        Some(RecordedSession {
            start_time,
            samples,
        })
    }

    fn clear(&mut self) {
        self.state = SessionState::Idle;
        self.start_time = None;
        self.samples.clear();
        self.current_sample = None;
        self.current_speed = None;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_collecting(&self) -> bool {
        self.state == SessionState::Collecting
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Samples in arrival order
    pub fn samples(&self) -> &[LocationPoint] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Most recently appended sample
    pub fn current_sample(&self) -> Option<&LocationPoint> {
        self.current_sample.as_ref()
    }

    /// Speed reported by the most recent sample, verbatim
    pub fn current_speed(&self) -> Option<f64> {
        self.current_speed
    }

    /// Time since start according to the session clock
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|start| self.clock.now() - start)
    }

    /// Get a serializable snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            start_time: self.start_time,
            sample_count: self.samples.len(),
            current_sample: self.current_sample.clone(),
            current_speed: self.current_speed,
        }
    }
}
