//! `import`: write Terraform import blocks for the bridge's devices.

use tracing::info;

use hue_config::OutputTarget;
use hue_core::{CachedClient, generate_import_output};

use crate::error::CliError;
use crate::output;

pub async fn handle(client: &CachedClient, target: &OutputTarget) -> Result<(), CliError> {
    let (devices, unresolved) = client.all_devices().await?;
    let report = generate_import_output(&devices, &unresolved);

    match target {
        OutputTarget::Stdout => output::print_output(&report)?,
        OutputTarget::File(path) => {
            std::fs::write(path, &report)?;
            info!(
                path = %path.display(),
                devices = devices.len(),
                unresolved = unresolved.len(),
                "wrote import report"
            );
        }
    }
    Ok(())
}
