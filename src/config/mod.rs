pub mod types;
pub mod kinds;
pub mod registry;
pub mod validator;

pub use types::*;
pub use registry::*;
pub use validator::*;
