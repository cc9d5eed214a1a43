pub mod entity;
pub mod membership;
pub mod query;
pub mod repository;
pub mod value_objects;

pub use entity::{Profile, SpacesPatch};
pub use membership::{ProfileSelection, SpaceOperation};
pub use query::{SpaceScope, sanitize_query, widen_space_field};
pub use repository::{ProfileHits, ProfileRepository};
pub use value_objects::{ProfileId, ProfileRole};
