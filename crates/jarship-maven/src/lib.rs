//! Maven publishing: artifact assembly, POM metadata, checksum sidecars,
//! detached signing, repository selection, and the upload transport.

pub mod artifact;
pub mod auth;
pub mod bundle;
pub mod checksum;
pub mod pom;
pub mod publication;
pub mod repository;
pub mod signing;
pub mod transport;
