//! Search papers and walk the first few result pages
//!
//! Shows how to:
//! 1. Build a client from `PAPERSWITHCODE_*` environment variables
//! 2. Page through a listing with `next_page`
//! 3. Resolve a lazy conference reference explicitly
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=paperswithcode=debug cargo run --example list_papers --features trace -- "graph neural"
//! ```

use paperswithcode::types::PaperQuery;
use paperswithcode::{Client, PageRequest};
use tracing_subscriber::EnvFilter;

const MAX_PAGES: u32 = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Request/retry logs go to stderr, filtered by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "residual".to_string());
    let client = Client::from_env()?;
    let papers = client.papers();

    let mut request = PageRequest::default().items_per_page(10);
    loop {
        let page = papers.list(&PaperQuery::search(&query), request)?;
        println!("page {} of {} matches", request.page, page.count);

        for paper in &page.results {
            let published = paper
                .published
                .map(|date| date.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("  {:<60} {}", paper.title, published);
        }

        match page.next_page {
            Some(next) if next <= MAX_PAGES => request = PageRequest { page: next, ..request },
            _ => break,
        }
    }

    // Conferences arrive as bare IDs until loaded
    let first = papers
        .list(&PaperQuery::search(&query), PageRequest::default())?
        .into_iter()
        .find(|paper| paper.conference.is_some());
    if let Some(mut paper) = first
        && let Some(conference) = paper.conference.as_mut()
    {
        let conference = conference.load(client.conferences())?;
        println!("\n{} appeared at {}", paper.title, conference.name);
    }

    Ok(())
}
