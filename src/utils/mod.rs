pub mod exec;
pub mod paths;
pub mod remote;
pub mod service;
pub mod sysinfo;
