//! Show a single entry

use anyhow::Result;

use crate::content::Collection;
use crate::helpers::strip_html;
use crate::Site;

/// Print one entry of a collection
pub async fn run(site: &Site, collection: &str, slug: &str) -> Result<()> {
    let collection: Collection = collection.parse()?;
    let entry = site.loader().load_entry(collection, slug).await?;

    println!("{}", entry.title);
    println!("  slug:      {}", entry.slug);
    println!("  path:      {}", collection.detail_path(&entry.slug));
    println!("  date:      {}", entry.date);
    println!("  category:  {}", entry.category);
    println!("  read time: {}", entry.read_time);
    if let Some(image) = &entry.image {
        println!("  image:     {}", image);
    }
    if let Some(link) = &entry.link {
        println!("  link:      {}", link);
    }
    println!();
    println!("{}", strip_html(&entry.content).trim());

    Ok(())
}
