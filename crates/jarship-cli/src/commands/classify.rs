//! Handler for `jarship classify`.

use miette::Result;

use jarship_core::version;

pub fn exec(version: &str) -> Result<()> {
    let kind = version::classify(version);
    println!("{kind} (repository `{}`)", kind.repository_id());
    Ok(())
}
