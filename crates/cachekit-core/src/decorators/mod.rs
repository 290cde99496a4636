//! Cache decorators: composable wrappers that alter admission or
//! reshape the key-only contract without altering the wrapped policy.

mod admission;
mod keyvalue;

pub use admission::RandomAdmission;
pub use keyvalue::KeyValueCache;
