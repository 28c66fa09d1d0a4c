//! `taptag resolve` command.

use crate::context::ServiceContext;
use crate::resolver::{resolve, Resolution};

/// Execute the `resolve` command.
///
/// Prints the redirect chain (`a -> b -> c`) when the address moved and the
/// bare username otherwise.
///
/// # Errors
///
/// Never fails; resolution itself is infallible.
pub async fn run(ctx: &ServiceContext, username: &str) -> Result<(), String> {
    let resolution = resolve(ctx.redirects.as_ref(), username).await;
    println!("{}", render(&resolution));
    Ok(())
}

fn render(resolution: &Resolution) -> String {
    if resolution.changed {
        resolution.chain_display()
    } else {
        resolution.resolved_username.clone()
    }
}
