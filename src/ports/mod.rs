/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports are the infrastructure interfaces the application
/// core depends on; adapters provide the concrete implementations.
pub mod outbound;
