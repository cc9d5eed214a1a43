pub mod client;
pub mod profiles;
pub mod spaces;

pub use client::BackendClient;
pub use profiles::BackendProfileRepository;
pub use spaces::BackendSpaceRepository;
