//! Person implementations shipped with the crate.

use factory_primitives::InstanceId;

use crate::{Person, person_type};

/// Male person, selected by `male` or `m`.
#[person_type("male", "m", name = "Male")]
#[derive(Debug, Default)]
pub struct Male {
    id: InstanceId,
}

impl Person for Male {
    fn kind(&self) -> &'static str {
        "male"
    }

    fn instance_id(&self) -> InstanceId {
        self.id
    }
}

/// Female person, selected by `female` or `f`.
#[person_type("female", "f", name = "Female")]
#[derive(Debug, Default)]
pub struct Female {
    id: InstanceId,
}

impl Person for Female {
    fn kind(&self) -> &'static str {
        "female"
    }

    fn instance_id(&self) -> InstanceId {
        self.id
    }
}
