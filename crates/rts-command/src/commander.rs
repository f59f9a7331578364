//! Turning player commands into agent actions.

use rts_agent::{ActionRequest, AddOutcome};
use rts_core::{Layer, ObjectId, Point};
use rts_sim::Scene;

use crate::{Selection, resolve_designation};

/// A player order for the current selection.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Smart order: each agent picks its first smart action that accepts
    /// the target.
    Designate {
        target: Option<ObjectId>,
        point:  Option<Point>,
        layer:  Layer,
        queue:  bool,
    },
    /// An explicitly chosen action.
    Order(ActionRequest),
    /// Cancel the current action and drop the queue.
    Stop,
}

/// Per-agent outcome counts of one [`Commander::issue`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueReport {
    pub started:  usize,
    pub queued:   usize,
    pub rejected: usize,
    pub stopped:  usize,
    /// Selected ids that no longer resolve to an agent.
    pub stale:    usize,
}

impl IssueReport {
    fn record(&mut self, outcome: AddOutcome) {
        match outcome {
            AddOutcome::Started => self.started += 1,
            AddOutcome::Queued => self.queued += 1,
            AddOutcome::Rejected => self.rejected += 1,
        }
    }

    /// Accumulate `other` into `self`.
    pub fn merge(&mut self, other: IssueReport) {
        self.started += other.started;
        self.queued += other.queued;
        self.rejected += other.rejected;
        self.stopped += other.stopped;
        self.stale += other.stale;
    }
}

pub struct Commander;

impl Commander {
    /// Apply `command` to every selected agent, in selection order.
    pub fn issue(scene: &mut Scene, selection: &Selection, command: &Command) -> IssueReport {
        let mut report = IssueReport::default();
        for agent in selection.iter() {
            if !scene.agents.contains(agent) {
                report.stale += 1;
                continue;
            }
            match command {
                Command::Stop => {
                    if scene.clear_actions(agent).is_ok() {
                        report.stopped += 1;
                    }
                }
                Command::Order(request) => match scene.add_action(agent, request) {
                    Ok(outcome) => report.record(outcome),
                    Err(e) => tracing::warn!(%agent, error = %e, "order failed"),
                },
                Command::Designate { target, point, layer, queue } => {
                    let Some(action) = resolve_designation(scene, agent, *target, *point, *layer) else {
                        report.rejected += 1;
                        continue;
                    };
                    let request = ActionRequest { action, target: *target, point: *point, layer: *layer, queue: *queue };
                    match scene.add_action(agent, &request) {
                        Ok(outcome) => report.record(outcome),
                        Err(e) => tracing::warn!(%agent, error = %e, "designation failed"),
                    }
                }
            }
        }
        tracing::debug!(selected = selection.len(), ?report, "command issued");
        report
    }
}
