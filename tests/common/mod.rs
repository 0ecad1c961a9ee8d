pub mod stubs;
pub mod synthetic;
