//! Command dispatch: CLI args -> cached client lookups -> output.

pub mod devices;
pub mod import;
pub mod lookup;

use hue_config::OutputTarget;
use hue_core::CachedClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a bridge-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &CachedClient,
    global: &GlobalOpts,
    report_target: OutputTarget,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices => devices::handle(client, global).await,
        Command::LightId(args) => lookup::light_id(client, &args.mac, global).await,
        Command::MotionId(args) => lookup::motion_id(client, &args.mac, global).await,
        Command::ScriptId(args) => lookup::script_id(client, &args.name, global).await,
        Command::Import(args) => {
            let target = match args.output {
                Some(ref raw) => raw.parse()?,
                None => report_target,
            };
            import::handle(client, &target).await
        }
        // Completions never reach a bridge.
        Command::Completions(_) => Ok(()),
    }
}
