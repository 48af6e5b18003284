pub mod completions;
pub mod dm;
pub mod doctor;
pub mod info;
pub mod install;
pub mod list;
pub mod maintenance;
pub mod power;
pub mod remove;
pub mod search;
pub mod self_update;
pub mod setup;
pub mod status;
pub mod update;
