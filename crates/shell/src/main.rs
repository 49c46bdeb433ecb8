//! ADH Cart — terminal shopping cart application entry point.

use std::io;

use anyhow::Result;

use adhcart_store::CartStore;

fn main() -> Result<()> {
    adhcart_observability::init();

    let catalog = adhcart_catalog::seed_catalog()?;
    let mut store = CartStore::new(catalog);
    tracing::info!(session_id = %store.session_id(), "cart session started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    adhcart_shell::repl::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?;

    tracing::info!(session_id = %store.session_id(), "cart session ended");
    Ok(())
}
