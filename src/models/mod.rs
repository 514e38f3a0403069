pub mod engineer;
pub mod user;

pub use engineer::{Availability, EngineerProfile, JoinNetworkRequest, SpecialtiesInput};
pub use user::{LoginRequest, RegisterRequest, User, USER_TYPES};
