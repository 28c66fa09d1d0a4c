//! `taptag vcf` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::services::profiles::find_profile;
use crate::services::vcard::render_vcard;

/// Execute the `vcf` command: print the contact card behind `username`.
///
/// # Errors
///
/// Returns an error string if no profile holds the resolved username or the
/// lookup fails.
pub async fn run(ctx: &ServiceContext, config: &Config, username: &str) -> Result<(), String> {
    let profile = find_profile(ctx, username).await.map_err(|e| e.to_string())?;
    print!("{}\r\n", render_vcard(&profile, &config.app_url));
    Ok(())
}
