//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Press;

/// Fetch all content and write the static site
pub async fn run(press: &Press) -> Result<()> {
    let start = std::time::Instant::now();

    let client = press.client()?;
    let generator = Generator::new(press)?;
    let summary = generator.generate(&client).await?;

    tracing::info!(
        "Generated {} articles in {:?}",
        summary.articles,
        start.elapsed()
    );
    if summary.skipped > 0 {
        tracing::warn!("Skipped {} articles", summary.skipped);
    }
    if summary.diagnostics > 0 {
        tracing::warn!(
            "{} blocks could not be rendered; see warnings above",
            summary.diagnostics
        );
    }

    Ok(())
}
