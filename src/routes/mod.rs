mod contacts;
mod health_check;
mod helpers;
mod home;
mod newsletter;

pub use contacts::*;
pub use health_check::*;
pub use helpers::{render_internal_error, ListError};
pub use home::*;
pub use newsletter::*;
