//! Identifier generation for threads and runs.

use uuid::Uuid;

/// Produces fresh thread and run identifiers.
///
/// Implementations must be safe to share between in-flight requests and
/// must not hand out identifiers that collide with ones already in use.
pub trait IdGenerator: Send + Sync {
    /// Returns a new, non-empty thread identifier.
    fn thread_id(&self) -> String;

    /// Returns a new, non-empty run identifier.
    fn run_id(&self) -> String;
}

/// Generates `thread_<uuid>` and `run_<uuid>` identifiers from random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn thread_id(&self) -> String {
        format!("thread_{}", Uuid::new_v4())
    }

    fn run_id(&self) -> String {
        format!("run_{}", Uuid::new_v4())
    }
}
