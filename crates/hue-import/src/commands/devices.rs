//! `devices`: the correlated device table plus unresolved records.

use serde::Serialize;
use tabled::Tabled;

use hue_api::ZigbeeConnectivity;
use hue_core::{CachedClient, DeviceEntry};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Light")]
    light: String,
    #[tabled(rename = "Motion")]
    motion: String,
    #[tabled(rename = "Device ID")]
    device_id: String,
}

impl From<&DeviceEntry> for DeviceRow {
    fn from(d: &DeviceEntry) -> Self {
        let or_dash = |v: Option<&str>| v.unwrap_or("-").to_owned();
        Self {
            name: d.name.clone(),
            mac: or_dash(d.mac_address.as_ref().map(hue_core::MacAddress::as_str)),
            light: or_dash(d.light_id.as_deref()),
            motion: or_dash(d.motion_id.as_deref()),
            device_id: d.device_id.clone(),
        }
    }
}

#[derive(Tabled)]
struct UnresolvedRow {
    #[tabled(rename = "Connectivity ID")]
    id: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ZigbeeConnectivity> for UnresolvedRow {
    fn from(z: &ZigbeeConnectivity) -> Self {
        Self {
            id: z.id.clone(),
            owner: format!("{} ({})", z.owner.rid, z.owner.rtype),
            mac: z.mac_address.clone(),
            status: z.status.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Serialize)]
struct DeviceListing<'a> {
    devices: &'a [DeviceEntry],
    unresolved: &'a [ZigbeeConnectivity],
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &CachedClient, global: &GlobalOpts) -> Result<(), CliError> {
    let (devices, unresolved) = client.all_devices().await?;

    let rendered = match global.format {
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let listing = DeviceListing {
                devices: &devices,
                unresolved: &unresolved,
            };
            output::render_single(global.format, &listing, "")?
        }
        OutputFormat::Table => {
            let mut text = output::render_list(
                global.format,
                &devices,
                |d| DeviceRow::from(d),
                |d| d.device_id.clone(),
            )?;
            if !unresolved.is_empty() {
                let rows: Vec<UnresolvedRow> = unresolved.iter().map(UnresolvedRow::from).collect();
                text.push_str("\n\nUnresolved zigbee connectivity:\n");
                text.push_str(&output::render_table(&rows));
            }
            text
        }
        OutputFormat::Plain => output::render_list(
            global.format,
            &devices,
            |d| DeviceRow::from(d),
            |d| d.device_id.clone(),
        )?,
    };

    output::print_output(&rendered)
}
