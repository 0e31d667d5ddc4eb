use crate::TaskCommands;
use crate::output;
use cmccloud_api::CmcClient;
use colored::Colorize;

pub async fn handle(client: &CmcClient, cmd: TaskCommands) -> anyhow::Result<()> {
    match cmd {
        TaskCommands::Info { id } => {
            let status = client.tasks().get(&id).await?;
            println!("{}", format!("Task {}", status.id).bold());
            output::print_field("status", &status.status);
            for (key, value) in &status.payload {
                output::print_field(key, value);
            }
        }
        TaskCommands::Wait { id, profile } => {
            output::waiting(&format!("Waiting for task {}...", id));
            let status = client.tasks().wait(&id, profile).await?;
            output::print_task("Task finished", &status);
        }
    }
    Ok(())
}
