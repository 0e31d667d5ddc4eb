use crate::VolumeCommands;
use crate::output;
use cmccloud_api::CmcClient;
use colored::Colorize;

pub async fn handle(client: &CmcClient, cmd: VolumeCommands) -> anyhow::Result<()> {
    let volumes = client.volumes();

    match cmd {
        VolumeCommands::Info { id } => {
            let volume = volumes.get(&id).await?;
            println!("{}", volume.name.bold());
            output::print_field("id", &volume.id);
            output::print_field("state", &volume.state);
            output::print_field("size", format!("{} GB", volume.size));
            output::print_field("type", &volume.volume_type);
            if !volume.server_id.is_empty() {
                output::print_field("server", &volume.server_id);
            }
        }
        VolumeCommands::Delete { id, profile } => {
            output::waiting(&format!("Deleting volume {}...", id));
            let status = volumes.delete(&id, profile).await?;
            output::print_task("Volume deleted", &status);
        }
        VolumeCommands::Resize { id, size, profile } => {
            output::waiting(&format!("Resizing volume {} to {} GB...", id, size));
            let outcome = volumes.resize(&id, size, profile).await?;
            output::print_order("Volume resized", &outcome);
        }
    }
    Ok(())
}
