pub mod action;
pub mod agent;
pub mod config;
pub mod decision_log;
pub mod environment;
pub mod error;
pub mod grid;
pub mod layout;
pub mod policy;
pub mod render;
pub mod rewards;
pub mod value_iteration;

pub use action::Action;
pub use agent::{Decision, MdpAgent};
pub use config::Config;
pub use environment::{Environment, GhostObservation, WorldSnapshot};
pub use error::{Result, SolverError};
pub use grid::{Cell, Grid, Position};
pub use layout::Layout;
pub use policy::{extract_policy, TransitionModel};
pub use rewards::{assign_rewards, RewardTable};
pub use value_iteration::{IterationOutcome, Termination, ValueIteration};
