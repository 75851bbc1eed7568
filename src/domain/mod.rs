//! Domain logic - pure merge and normalization rules independent of I/O

pub mod contact;
pub mod info;
pub mod license;
pub mod version;

pub use contact::{infer_contact, Author, Contact};
pub use info::{InfoField, InfoFields, OverrideSelection};
pub use license::{License, LicenseRecord};
pub use version::{compare_versions, SpecVersion};
