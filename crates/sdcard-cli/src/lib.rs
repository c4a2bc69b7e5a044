//! Library side of the `sdcard` binary, split out so commands can be tested.

pub mod commands;
pub mod logging;
pub mod report;
pub mod workspace;
