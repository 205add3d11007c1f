// ── Domain model ──
//
// Merged, bridge-independent views over raw CLIP v2 resources.

pub mod device_entry;
pub mod mac;

pub use device_entry::DeviceEntry;
pub use mac::MacAddress;
