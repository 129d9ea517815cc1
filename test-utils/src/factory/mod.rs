//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` function
//! for quick default creation. SQLite enforces foreign keys in tests, so factories take
//! the ids of their parent rows; `helpers` builds whole households in one call.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let rt = factory::rt::create_rt(db).await?;
//! let resident = factory::resident::create_resident(db, rt.id).await?;
//!
//! let (rt, family, resident, user) = factory::helpers::create_household(db, 1).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let rt_user = factory::user::UserFactory::new(db)
//!     .role("RT")
//!     .rt_id(rt.id)
//!     .rw(rt.rw)
//!     .build()
//!     .await?;
//! ```

pub mod assistance;
pub mod complaint;
pub mod document;
pub mod event;
pub mod family;
pub mod forum;
pub mod helpers;
pub mod notification;
pub mod resident;
pub mod rt;
pub mod user;

pub use family::create_family;
pub use resident::create_resident;
pub use rt::create_rt;
pub use user::create_user;
