//! webloc_tidy: command line front end for the webloc pipeline.
pub mod cli;
pub mod config;
pub mod confirm;
pub mod logging;
pub mod output;
mod run;

pub use run::{pick_api_key, run};
