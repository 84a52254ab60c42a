//! End-to-end demo of the career search client.
//!
//! Point it at a backend with `CAREER_SEARCH_ENDPOINTS`, or run it with
//! nothing listening to watch the fallback tiers answer instead:
//!
//! ```bash
//! cargo run --example job_search_demo
//! ```

use career_search_sdk::{CareerSearchClient, ClientConfig, SearchCriteria};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = CareerSearchClient::new(ClientConfig::load()?)?;

    match client.discover().await {
        Some(endpoint) => println!("✓ Using endpoint {}", endpoint),
        None => println!("✗ No endpoint answered; listings will be generated"),
    }

    let healthy = client.check_health(false).await;
    println!("✓ Backend healthy: {}", healthy);

    let criteria = SearchCriteria::new("React Developer")
        .with_location("İstanbul")
        .with_limit(5);

    let results = client.search(&criteria).await?;
    println!(
        "\n✓ {} listings, {} total matches (source: {})\n",
        results.jobs.len(),
        results.total_results,
        results.provenance.as_str()
    );

    for job in &results.jobs {
        println!("  {} at {} ({})", job.title, job.company, job.location);
        if let Some(salary) = &job.salary {
            println!("      {} | {}", job.employment_type, salary);
        }
        if !job.requirements.is_empty() {
            println!("      Skills: {}", job.requirements.join(", "));
        }
    }

    if let Some(message) = &results.message {
        println!("\nNote: {}", message);
    }

    if let Some(url) = results.jobs.first().and_then(|job| job.url.as_ref()) {
        let details = client.jobs().details(url).await?;
        println!("\n✓ Details for {}:", details.job_url.as_deref().unwrap_or(url));
        if let Some(message) = &details.message {
            println!("  {}", message);
        }
    }

    Ok(())
}
