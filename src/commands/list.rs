//! List site content

use anyhow::Result;

use crate::content::Collection;
use crate::Site;

/// List the entries of a collection, newest first
pub async fn run(site: &Site, collection: &str) -> Result<()> {
    let collection: Collection = collection.parse()?;
    let entries = site.loader().try_load_list(collection).await?;

    println!("{} ({}):", collection.label(), entries.len());
    for entry in entries {
        let date = if entry.date.is_empty() {
            "----------"
        } else {
            entry.date.as_str()
        };
        println!("  {} - {} [{}]", date, entry.title, entry.slug);
    }

    Ok(())
}
