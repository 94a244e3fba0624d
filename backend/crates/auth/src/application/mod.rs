//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap_superuser;
pub mod config;
pub mod manage_users;
pub mod obtain_token;
pub mod own_profile;
pub mod resolve_actor;
pub mod sign_up;
pub mod user_patch;

// Re-exports
pub use bootstrap_superuser::BootstrapSuperuserUseCase;
pub use config::AuthConfig;
pub use manage_users::{CreateUserInput, ManageUsersUseCase};
pub use obtain_token::{ObtainTokenInput, ObtainTokenOutput, ObtainTokenUseCase};
pub use own_profile::OwnProfileUseCase;
pub use resolve_actor::ResolveActorUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use user_patch::UserPatch;
