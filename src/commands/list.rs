//! List CMS content

use anyhow::Result;

use crate::helpers::short_date;
use crate::Press;

/// List CMS content by type
pub async fn run(press: &Press, content_type: &str) -> Result<()> {
    let client = press.client()?;

    match content_type {
        "article" | "articles" => {
            let articles = client.get_articles().await?;
            println!("Articles ({}):", articles.len());
            for article in articles {
                let date = article
                    .display_date()
                    .map(|d| short_date(&d))
                    .unwrap_or_else(|| "-".to_string());
                let category = article
                    .category
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .unwrap_or("uncategorized");
                println!(
                    "  {} - {} [{}] ({})",
                    date, article.title, article.slug, category
                );
            }
        }
        "author" | "authors" => {
            let authors = client.get_authors().await?;
            println!("Authors ({}):", authors.len());
            for author in authors {
                match author.email {
                    Some(email) if !email.is_empty() => {
                        println!("  {} <{}>", author.name, email)
                    }
                    _ => println!("  {}", author.name),
                }
            }
        }
        "category" | "categories" => {
            let categories = client.get_categories().await?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!(
                    "  {} [{}]",
                    category.name,
                    category.slug.as_deref().unwrap_or("-")
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: article, author, category",
                content_type
            );
        }
    }

    Ok(())
}
