// Entrypoint for the credential provisioning tool.
// - Keeps `main` small: wire the console, the store and the directory
//   creator together and hand them to the provisioning flow.
// - Returns `anyhow::Result` so any failure ends the process with the
//   full error chain and a non-zero status.

use add_users::store::{FileStore, FsDirectories};
use add_users::ui::ConsolePrompter;
use add_users::{Outcome, Provisioner, Settings};
use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG is set, so the dialogue itself is unchanged.
    env_logger::init();

    let settings = Settings::default();
    let store_name = settings.store_display_name();
    let mut provisioner = Provisioner::new(
        ConsolePrompter::new(),
        FileStore::new(&settings.store_path),
        FsDirectories::new(&settings.user_root),
        store_name,
    );

    match provisioner.run().context("user provisioning failed")? {
        Outcome::Aborted => {}
        Outcome::Completed { .. } => println!("\n\nDone."),
    }
    Ok(())
}
