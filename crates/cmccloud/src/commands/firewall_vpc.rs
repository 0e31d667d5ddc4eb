use crate::FirewallVpcCommands;
use crate::output;
use cmccloud_api::CmcClient;
use colored::Colorize;

pub async fn handle(client: &CmcClient, cmd: FirewallVpcCommands) -> anyhow::Result<()> {
    let firewalls = client.vpc_firewalls();

    match cmd {
        FirewallVpcCommands::Rules { id } => {
            let rules = firewalls.rules(&id).await?;
            if rules.is_empty() {
                println!("{}", "No rules".dimmed());
                return Ok(());
            }
            println!(
                "{}",
                format!(
                    "{:<38} {:<8} {:<8} {:<12} {}",
                    "ID", "ACTION", "PROTO", "PORTS", "CIDRS"
                )
                .bold()
            );
            for rule in rules {
                println!(
                    "{:<38} {:<8} {:<8} {:<12} {}",
                    rule.id,
                    rule.action,
                    rule.protocol,
                    rule.port_range,
                    rule.cidrs.join(",")
                );
            }
        }
        FirewallVpcCommands::ClearRules { id, profile } => {
            output::waiting(&format!("Deleting all rules of firewall {}...", id));
            let statuses = firewalls.delete_all_rules(&id, profile).await?;
            println!(
                "{} {}",
                "✓".green().bold(),
                format!("Deleted {} rule(s)", statuses.len()).green().bold()
            );
        }
    }
    Ok(())
}
