//! `taptag links` command.

use crate::context::ServiceContext;
use crate::services::links::links_for_username;

/// Execute the `links` command.
///
/// Prints one `platform<TAB>url` line per link in display order.
///
/// # Errors
///
/// Returns an error string if no profile holds the resolved username or the
/// lookup fails.
pub async fn run(ctx: &ServiceContext, username: &str) -> Result<(), String> {
    let links = links_for_username(ctx, username).await.map_err(|e| e.to_string())?;
    if links.is_empty() {
        println!("No links.");
        return Ok(());
    }
    for link in &links {
        println!("{}\t{}", link.platform, link.url);
    }
    Ok(())
}
