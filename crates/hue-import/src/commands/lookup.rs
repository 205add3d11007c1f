//! Single-identifier lookups: MAC -> light / motion, name -> script.

use serde::Serialize;

use hue_core::CachedClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct MacLookup<'a> {
    mac: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    light_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    motion_id: Option<&'a str>,
}

#[derive(Serialize)]
struct ScriptLookup<'a> {
    name: &'a str,
    id: &'a str,
}

pub async fn light_id(client: &CachedClient, mac: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let id = client.light_id_for_mac(mac).await?;
    let data = MacLookup {
        mac,
        light_id: Some(&id),
        motion_id: None,
    };
    output::print_output(&output::render_single(global.format, &data, &id)?)
}

pub async fn motion_id(
    client: &CachedClient,
    mac: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = client.motion_id_for_mac(mac).await?;
    let data = MacLookup {
        mac,
        light_id: None,
        motion_id: Some(&id),
    };
    output::print_output(&output::render_single(global.format, &data, &id)?)
}

pub async fn script_id(
    client: &CachedClient,
    name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = client.behavior_script_id_for_name(name).await?;
    let data = ScriptLookup { name, id: &id };
    output::print_output(&output::render_single(global.format, &data, &id)?)
}
