//! Instanced space fields: star boxes, sky shells and hand-placed planet
//! layouts.
//!
//! Fields are generated once at scene construction into a flat list of
//! [`ParticleInstance`]s and written index-for-index into a host
//! [`InstanceSink`]. Per-frame motion rotates the whole group and never touches
//! individual instances.

mod bounds;
mod field;
mod instances;
mod layout;

pub use bounds::FieldBounds;
pub use field::{FieldStyle, InstanceTransform, ParticleFieldGenerator, ParticleInstance};
pub use instances::{InstanceBuffer, InstanceDirty, InstanceRaw, InstanceSink, write_field};
pub use layout::{FixedInstance, fixed_field};
