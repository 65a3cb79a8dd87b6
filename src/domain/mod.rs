//! Domain value types: versions, commit records, prerelease rules

pub mod commit;
pub mod prerelease;
pub mod version;

pub use commit::CommitRecord;
pub use prerelease::{resolve_prerelease, PrereleaseRule};
pub use version::{Version, VersionBump};
