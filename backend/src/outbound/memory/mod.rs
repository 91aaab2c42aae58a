//! In-process stores backing the directory and registry ports.
//!
//! Records live for the lifetime of the server process. These adapters stand
//! in for a database and keep the same duplicate-email rules a unique index
//! would enforce.

mod doctor_registry;
mod user_directory;

pub use doctor_registry::InMemoryDoctorRegistry;
pub use user_directory::InMemoryUserDirectory;
