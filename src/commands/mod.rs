// Commands module - HTTP handlers over the session storage
// One submodule per resource; routes are assembled in `server`

pub mod common;
pub mod session;
pub mod task;
pub mod view;
