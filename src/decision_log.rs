use crate::action::Action;
use crate::error::{Result, SolverError};
use crate::grid::Position;
use crate::value_iteration::Termination;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Instant;

/// One decision step as the agent saw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedDecision {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    /// Decision index within the episode, starting at 0
    pub step: usize,
    pub position: Position,
    pub legal: Vec<Action>,
    pub chosen: Action,
    pub sweeps: usize,
    pub termination: Termination,
    /// True when no cardinal action was legal and Stop was returned instead
    pub fallback: bool,
}

/// Decision logger
pub struct DecisionLog {
    start_time: Instant,
    decisions: Vec<LoggedDecision>,
}

impl Default for DecisionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionLog {
    pub fn new() -> Self {
        DecisionLog {
            start_time: Instant::now(),
            decisions: Vec::new(),
        }
    }

    /// Record a decision, stamping it with the elapsed time
    pub fn record(&mut self, mut decision: LoggedDecision) {
        decision.timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.decisions.push(decision);
    }

    pub fn decisions(&self) -> &[LoggedDecision] {
        &self.decisions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.decisions).map_err(|source| {
            SolverError::Serialization {
                message: "failed to serialize decision log".to_string(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| SolverError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Load a previously saved log
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.to_string(),
            source,
        })?;
        let decisions = serde_json::from_str(&json).map_err(|source| SolverError::Serialization {
            message: format!("failed to parse decision log '{}'", path),
            source,
        })?;
        Ok(DecisionLog {
            start_time: Instant::now(),
            decisions,
        })
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Decision Log ({} steps) ===", self.decisions.len());
        for d in &self.decisions {
            let marker = if d.fallback { " [fallback]" } else { "" };
            println!(
                "[{:6}ms] #{:3} ({}, {}) -> {:<5} sweeps={:2} {:?}{}",
                d.timestamp_ms, d.step, d.position.x, d.position.y, d.chosen.to_string(), d.sweeps, d.termination, marker
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let converged = self
            .decisions
            .iter()
            .filter(|d| d.termination == Termination::Converged)
            .count();
        let fallbacks = self.decisions.iter().filter(|d| d.fallback).count();
        let total_sweeps: usize = self.decisions.iter().map(|d| d.sweeps).sum();
        let duration = self.decisions.last().map(|d| d.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Decisions: {} ({} converged, {} hit the sweep cap)\n\
             Sweeps: {} total\n\
             Fallbacks to Stop: {}",
            duration,
            self.decisions.len(),
            converged,
            self.decisions.len() - converged,
            total_sweeps,
            fallbacks
        )
    }
}
