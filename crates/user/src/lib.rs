pub mod doc;
pub mod preferences;
pub mod store;

pub use doc::{ProfileUpdate, UserDoc};
pub use preferences::Preferences;
pub use store::{StoreError, UserStore};
