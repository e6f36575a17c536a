use clap::Args;
use std::io::{self, Write};

use crate::config::Config;
use crate::sync::SyncClient;

/// Delete every person stored on the server
#[derive(Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(long, short)]
    force: bool,
}

impl ClearCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let client = SyncClient::from_config(config)?;

        // Confirm deletion unless --force is used
        if !self.force {
            print!(
                "Delete all people and medications on {}? [y/N] ",
                client.api_base_url()
            );
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(client.clear())?;

        println!("Cleared all data on server.");
        Ok(())
    }
}
