use crate::ImageCommands;
use cmccloud_api::CmcClient;
use colored::Colorize;

pub async fn handle(client: &CmcClient, cmd: ImageCommands) -> anyhow::Result<()> {
    match cmd {
        ImageCommands::List => {
            let images = client.images().list().await?;
            println!("{}", format!("{:<38} {:<6} {}", "ID", "BITS", "NAME").bold());
            for image in images {
                println!("{:<38} {:<6} {}", image.id, image.bits, image.name);
            }
        }
    }
    Ok(())
}
