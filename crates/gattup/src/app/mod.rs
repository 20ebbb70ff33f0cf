//! The application layer: registration sequencing and event routing

pub mod application;
pub mod error;
pub mod registration;


pub use application::GattsApplication;
pub use error::{AppError, AppResult};
pub use registration::{Registrar, RegistrationState};
