//! Event types and sinks for observing placement runs.
//!
//! This module defines [`PlacerEvent`] and a set of sinks to collect or
//! forward events while executing
//! [`crate::placer::SurfacePlacer::place_prefabs_with_events`]. The unit type
//! `()` is the no-op sink.
use glam::Vec2;

use crate::color::Rgba;
use crate::placer::RunResult;
use crate::planner::PlacedTransform;

/// Describes events emitted during placement.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlacerEvent {
    /// Emitted after preconditions pass, before any candidate is evaluated.
    RunStarted {
        /// Candidates generated for this run.
        candidate_count: usize,
        /// Seed feeding the run's random stream.
        seed: u64,
    },

    /// Emitted after a candidate's texel was matched against the criterion.
    CandidateEvaluated {
        /// Index of the candidate in the run's sequence.
        index: usize,
        /// UV the texel was sampled at.
        uv: Vec2,
        /// Sampled color.
        color: Rgba,
        /// Whether the criterion matched.
        matched: bool,
    },

    /// Emitted when an instance was spawned.
    PlacementMade {
        /// Index of the originating candidate.
        candidate_index: usize,
        /// Final transform of the instance.
        transform: PlacedTransform,
    },

    /// Emitted when the run finishes.
    RunFinished {
        /// Aggregated result for the run.
        result: RunResult,
    },

    /// Emitted when tracked instances were cleared.
    Cleared {
        /// Number of instances despawned.
        removed: usize,
    },

    /// Non-fatal warning generated during placement.
    Warning {
        /// Context string (e.g. a binding or candidate description).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Kinds of [`PlacerEvent`], used by sinks to opt in per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlacerEventKind {
    RunStarted,
    CandidateEvaluated,
    PlacementMade,
    RunFinished,
    Cleared,
    Warning,
}

/// Receives events during a placement run.
pub trait EventSink {
    /// Whether the sink wants events of this kind. Producers may skip
    /// building events the sink does not want.
    fn wants(&self, kind: PlacerEventKind) -> bool;

    fn send(&mut self, event: PlacerEvent);
}

/// No-op sink.
impl EventSink for () {
    fn wants(&self, _kind: PlacerEventKind) -> bool {
        false
    }

    fn send(&mut self, _event: PlacerEvent) {}
}

/// Sink collecting all events into a vector.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PlacerEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<PlacerEvent> {
        self.events
    }
}

impl EventSink for VecSink {
    fn wants(&self, _kind: PlacerEventKind) -> bool {
        true
    }

    fn send(&mut self, event: PlacerEvent) {
        self.events.push(event);
    }
}

/// Sink forwarding every event to a closure.
pub struct FnSink<F: FnMut(PlacerEvent)> {
    f: F,
}

impl<F: FnMut(PlacerEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(PlacerEvent)> EventSink for FnSink<F> {
    fn wants(&self, _kind: PlacerEventKind) -> bool {
        true
    }

    fn send(&mut self, event: PlacerEvent) {
        (self.f)(event);
    }
}
