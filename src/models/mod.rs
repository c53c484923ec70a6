pub mod registration;

pub use registration::{ExperienceLevel, Registration, RegistrationRequest};
