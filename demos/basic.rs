//! Basic example demonstrating the Insightly API client.
//!
//! Run with:
//! ```
//! INSIGHTLY_API_KEY=your-key cargo run --example basic
//! ```

use insightly::{
    CollectionFilter, Get, InsightlyClient, Instance, Links, List, Opportunity, PipelineStage,
};

#[tokio::main]
async fn main() -> insightly::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Insightly client...");
    let client = InsightlyClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    let instance = Instance::get(&client).await?;
    println!("Instance: {} ({})", instance.instance_name, instance.plan_name);

    // Pipeline stages are few, so fetch them all
    println!("\n--- Pipeline Stages ---");
    let stages = PipelineStage::list_all(&client, &CollectionFilter::default()).await?;
    for stage in &stages {
        println!("  {}. {} (pipeline {})", stage.stage_order, stage.stage_name, stage.pipeline_id);
    }

    // First page of opportunities only
    println!("\n--- Opportunities (first page) ---");
    let page = Opportunity::list_page(&client, &CollectionFilter::default(), 0, 10).await?;
    println!("Fetched {} opportunities (more: {})", page.len(), page.has_more);

    for opportunity in &page {
        println!(
            "  - #{} {} [{}]",
            opportunity.opportunity_id,
            opportunity.opportunity_name,
            opportunity.opportunity_state.as_deref().unwrap_or("-")
        );
    }

    if let Some(first) = page.items.first() {
        println!("\n--- Opportunity Details ---");
        let opportunity = Opportunity::get(&client, first.opportunity_id).await?;
        println!("Opportunity: {}", opportunity.opportunity_name);
        println!("  Value: {:?} {}", opportunity.opportunity_value, opportunity.bid_currency.as_deref().unwrap_or(""));
        println!("  Custom fields: {}", opportunity.custom_fields.len());

        let links = Opportunity::links(&client, opportunity.opportunity_id).await?;
        println!("  Links: {}", links.len());
        for link in links.iter().take(5) {
            println!(
                "    -> {} {}",
                link.link_object_name.as_deref().unwrap_or("?"),
                link.link_object_id.unwrap_or_default()
            );
        }
    }

    // Everything that is still open, across all pages
    println!("\n--- Open Opportunities ---");
    let open = Opportunity::list_all(&client, &CollectionFilter::field("OPPORTUNITY_STATE", "OPEN")).await?;
    println!("{} open opportunities", open.len());

    println!("\nDone!");
    Ok(())
}
