pub mod db;
pub mod sequencer;

pub use db::bring_up_database;
pub use sequencer::{StartupPhase, StartupReport, StartupSequencer};
