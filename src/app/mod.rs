// Application layer: the terminal display side of the monitor.

pub mod display;
pub mod watch;
