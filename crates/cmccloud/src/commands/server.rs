use crate::ServerCommands;
use crate::output;
use cmccloud_api::{CmcClient, Flavor};
use colored::Colorize;

pub async fn handle(client: &CmcClient, cmd: ServerCommands) -> anyhow::Result<()> {
    let servers = client.servers();

    match cmd {
        ServerCommands::Info { id } => {
            let server = servers.get(&id).await?;
            println!("{}", server.name.bold());
            output::print_field("id", &server.id);
            output::print_field("state", state_colored(&server.state));
            output::print_field("region", &server.region_name);
            output::print_field("ip", &server.main_ip_address);
            output::print_field("image", &server.image_name);
            output::print_field(
                "flavor",
                format!(
                    "{} vCPU / {} GB RAM / {} GB disk",
                    server.cpu, server.ram, server.root
                ),
            );
            if server.gpu > 0 {
                output::print_field("gpu", server.gpu);
            }
            output::print_field("backup", server.auto_backup);
            for nic in &server.nics {
                output::print_field("nic", format!("{} ({})", nic.ip4_address, nic.id));
            }
        }
        ServerCommands::Start { id, profile } => {
            output::waiting(&format!("Starting server {}...", id));
            let status = servers.start(&id, profile).await?;
            output::print_task("Server started", &status);
        }
        ServerCommands::Stop { id, profile } => {
            output::waiting(&format!("Stopping server {}...", id));
            let status = servers.stop(&id, profile).await?;
            output::print_task("Server stopped", &status);
        }
        ServerCommands::Restart { id, profile } => {
            output::waiting(&format!("Restarting server {}...", id));
            let status = servers.restart(&id, profile).await?;
            output::print_task("Server restarted", &status);
        }
        ServerCommands::Delete { id, profile } => {
            output::waiting(&format!("Deleting server {}...", id));
            let status = servers.delete(&id, profile).await?;
            output::print_task("Server deleted", &status);
        }
        ServerCommands::Resize {
            id,
            cpu,
            ram,
            disk,
            gpu,
            profile,
        } => {
            output::waiting(&format!("Resizing server {}...", id));
            let flavor = Flavor {
                cpu,
                ram_gb: ram,
                root_gb: disk,
                gpu,
            };
            let outcome = servers.resize(&id, flavor, profile).await?;
            output::print_order("Server resized", &outcome);
        }
        ServerCommands::Snapshot { id, name, profile } => {
            output::waiting(&format!("Taking snapshot '{}' of server {}...", name, id));
            let outcome = servers.take_snapshot(&id, &name, profile).await?;
            output::print_order("Snapshot taken", &outcome);
        }
        ServerCommands::Console { id } => {
            println!("{}", servers.console_url(&id).await?);
        }
    }
    Ok(())
}

fn state_colored(state: &str) -> colored::ColoredString {
    match state.to_lowercase().as_str() {
        "running" => state.green(),
        "stopped" => state.red(),
        _ => state.yellow(),
    }
}
