pub mod session;
pub mod signal;

pub use session::*;
pub use signal::*;
