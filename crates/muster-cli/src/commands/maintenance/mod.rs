//! Maintenance command handlers.

mod check;
mod reassign_id;
mod reset_sequence;

pub use check::handle_check;
pub use reassign_id::handle_reassign_id;
pub use reset_sequence::handle_reset_sequence;
