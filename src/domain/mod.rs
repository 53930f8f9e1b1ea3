//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod calver;
pub mod clock;
pub mod prerelease;
pub mod scheme;
pub mod semver;
pub mod tag;
pub mod versioner;

pub use branch::FlowKind;
pub use calver::CalVer;
pub use clock::{Clock, FixedClock, SystemClock};
pub use scheme::{Bump, Scheme};
pub use semver::SemVer;
pub use versioner::{TagSource, Versioner};
