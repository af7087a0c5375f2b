//! Characters, their classes and stats, and persistence.

pub mod class;
pub mod health;
pub mod save;
pub mod snapshot;
pub mod types;

pub use class::{BaseStats, CharacterClass};
pub use health::rescale_health;
pub use save::{sanitize_name, SaveError, SaveInfo, SaveManager};
pub use snapshot::CharacterSnapshot;
pub use types::{Character, Progression};
