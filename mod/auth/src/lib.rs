pub mod middleware;
pub mod policy;
pub mod token;

pub use token::{AuthState, Claims};
