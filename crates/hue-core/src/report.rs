// ── Terraform import report ──
//
// Renders the correlated device list as `import` blocks plus matching
// `resource` stubs, so an existing bridge can be adopted into Terraform
// state. Devices that are neither lights nor motion sensors are skipped.

use hue_api::ZigbeeConnectivity;

use crate::model::{DeviceEntry, MacAddress};

/// Terraform resource name for a display name: lowercased, spaces replaced
/// by underscores.
pub fn resource_name(display_name: &str) -> String {
    display_name.to_lowercase().replace(' ', "_")
}

/// Build the full import report.
///
/// Import blocks come first in entry order, then one comment per unresolved
/// connectivity record, then every resource stub. A device with both a light
/// and a motion service is imported as a light.
pub fn generate_import_output(entries: &[DeviceEntry], unresolved: &[ZigbeeConnectivity]) -> String {
    let mut imports = String::new();
    let mut resources = String::new();

    for entry in entries {
        let Some((import, resource)) = entry_blocks(entry) else {
            continue;
        };
        imports.push_str(&import);
        resources.push_str(&resource);
    }

    for record in unresolved {
        imports.push_str(&format!(
            "\n/* \nCould not resolve MAC address:\n{}\n*/\n",
            describe(record)
        ));
    }

    imports + &resources
}

fn entry_blocks(entry: &DeviceEntry) -> Option<(String, String)> {
    let kind = if entry.is_light() {
        "philips_light"
    } else if entry.is_motion() {
        "philips_motion"
    } else {
        return None;
    };

    let formatted = resource_name(&entry.name);
    let mac = entry
        .mac_address
        .as_ref()
        .map(MacAddress::as_str)
        .unwrap_or_default();

    let import = format!(
        "\nimport {{\n  # Name = {name}\n  id = \"{mac}\"\n  to = {kind}.{formatted}\n}}\n",
        name = entry.name,
    );
    let resource = if entry.is_light() {
        format!(
            "\nresource philips_light \"{formatted}\" {{\n  name = \"{name}\"\n  type = \"decorative\"\n}}\n",
            name = entry.name,
        )
    } else {
        format!("\nresource philips_motion \"{formatted}\" {{\n  enabled = true\n}}\n")
    };

    Some((import, resource))
}

fn describe(record: &ZigbeeConnectivity) -> String {
    format!(
        "{{id: {} owner: {} ({}) mac_address: {} status: {}}}",
        record.id,
        record.owner.rid,
        record.owner.rtype,
        record.mac_address,
        record.status.as_deref().unwrap_or("unknown"),
    )
}
