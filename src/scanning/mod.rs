/// Scanning domain - pure types and services for organization scans.
///
/// Contains the rate-limit pacing policy, session lifecycle types, and
/// the schema-less BOM query engine. Nothing in this module performs
/// I/O; infrastructure is reached through the ports.
pub mod domain;
pub mod services;
