//! The abstraction every factory-produced implementation satisfies.

use std::fmt;

use factory_primitives::InstanceId;

/// A person produced by the factory.
pub trait Person: fmt::Debug + Send + Sync {
    /// Short label of the implementation, e.g. `"female"`.
    fn kind(&self) -> &'static str;

    /// Identity of this particular instance.
    fn instance_id(&self) -> InstanceId;
}
