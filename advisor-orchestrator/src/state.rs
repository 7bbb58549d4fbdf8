//! Pipeline states and the transition trace returned with every response.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stages a request passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Received,
    Classified,
    Dispatched,
    Assembled,
    Complianced,
    Delivered,
    /// Something failed; a degraded response is being produced.
    Errored,
}

impl PipelineState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Classified => "classified",
            Self::Dispatched => "dispatched",
            Self::Assembled => "assembled",
            Self::Complianced => "complianced",
            Self::Delivered => "delivered",
            Self::Errored => "errored",
        }
    }

    /// Whether `self → next` is a legal transition.
    ///
    /// `Errored` is reachable from every non-terminal state and resumes at
    /// assembly or gating, so a degraded response still passes the gate.
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Received, Classified)
                | (Classified, Dispatched)
                | (Dispatched, Assembled)
                | (Assembled, Complianced)
                | (Complianced, Delivered)
                | (Errored, Assembled)
                | (Errored, Complianced)
        ) || (next == Errored && !matches!(self, Delivered | Errored))
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Delivered
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal pipeline transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: PipelineState,
    pub to: PipelineState,
}

/// Ordered record of every state the request entered.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineTrace {
    transitions: Vec<(PipelineState, DateTime<Utc>)>,
}

impl PipelineTrace {
    /// Trace starting in `Received`.
    pub fn new() -> Self {
        Self {
            transitions: vec![(PipelineState::Received, Utc::now())],
        }
    }

    pub fn current(&self) -> PipelineState {
        self.transitions
            .last()
            .map(|(s, _)| *s)
            .unwrap_or(PipelineState::Received)
    }

    /// Move to `next`. An illegal move records `Errored` instead and
    /// reports the rejected transition.
    pub fn advance(&mut self, next: PipelineState) -> Result<(), IllegalTransition> {
        let from = self.current();
        if from.can_advance_to(next) {
            self.transitions.push((next, Utc::now()));
            return Ok(());
        }
        if from != PipelineState::Errored {
            self.transitions.push((PipelineState::Errored, Utc::now()));
        }
        Err(IllegalTransition { from, to: next })
    }

    pub fn states(&self) -> Vec<PipelineState> {
        self.transitions.iter().map(|(s, _)| *s).collect()
    }

    pub fn transitions(&self) -> &[(PipelineState, DateTime<Utc>)] {
        &self.transitions
    }

    pub fn passed_through(&self, state: PipelineState) -> bool {
        self.transitions.iter().any(|(s, _)| *s == state)
    }
}

impl Default for PipelineTrace {
    fn default() -> Self {
        Self::new()
    }
}
