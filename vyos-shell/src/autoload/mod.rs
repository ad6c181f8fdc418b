//! Autoload: discover the device's inventory and flatten it for the platform.

mod details;
mod discovery;
mod model;

pub use details::{AutoLoadAttribute, AutoLoadDetails, AutoLoadResource, CHASSIS_MODEL, PORT_MODEL};
pub use discovery::{CHASSIS_NAME, InventoryBuilder};
pub use model::{Chassis, Device, Port, ResourceTree};
