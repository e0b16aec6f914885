//! `search` command: one market query through a [`QuerySession`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use grocywise_core::{
    chart_series, AppConfig, FilterSet, LocationDirectory, LocationSelector, QueryResult,
};
use grocywise_pipeline::{QueryPipeline, QuerySession, QueryState};

#[derive(Debug)]
pub(crate) struct SearchArgs {
    pub country: String,
    pub city: Option<String>,
    pub shopping_list: Option<String>,
    pub food_groups: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub cuisines: Vec<String>,
    pub json: bool,
}

/// Validate the requested location; a missing city means the country's
/// first listed city.
pub(crate) fn resolve_location(
    directory: &LocationDirectory,
    country: &str,
    city: Option<&str>,
) -> anyhow::Result<LocationSelector> {
    let location = match city {
        Some(city) => LocationSelector::new(directory, country, city)?,
        None => LocationSelector::for_country(directory, country)?,
    };
    Ok(location)
}

/// Run the query and print the outcome.
///
/// # Errors
///
/// Returns an error for an invalid location or filter label, a client that
/// cannot be built, a caller-side timeout, or a failed query (reported with
/// the generic service message).
pub(crate) async fn run_search(
    config: &AppConfig,
    directory: &LocationDirectory,
    args: SearchArgs,
) -> anyhow::Result<()> {
    let location = resolve_location(directory, &args.country, args.city.as_deref())?;
    let filters = FilterSet::from_labels(
        &args.food_groups,
        &args.dietary_restrictions,
        &args.cuisines,
    )?;
    let pipeline = QueryPipeline::from_config(config)?;
    tracing::info!(
        country = location.country(),
        city = location.city(),
        has_list = args.shopping_list.is_some(),
        filtered = !filters.is_empty(),
        "running market query"
    );

    let mut session = QuerySession::new();
    let submit = session.submit(
        &pipeline,
        &location,
        args.shopping_list.as_deref(),
        Some(&filters),
    );
    let state = match config.request_timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), submit)
            .await
            .map_err(|_| {
                tracing::warn!(timeout_secs = secs, "market query timed out");
                anyhow::anyhow!("market query timed out after {secs}s")
            })??,
        None => submit.await?,
    };

    match state {
        QueryState::Succeeded(result) => {
            tracing::info!(
                produce = result.produce.len(),
                stores = result.stores.len(),
                sources = result.sources.len(),
                "market query succeeded"
            );
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", render_report(&location, result, Utc::now()));
            }
            Ok(())
        }
        QueryState::Failed(err) => {
            tracing::warn!(error = %err, "market query failed");
            Err(anyhow::anyhow!("{err}"))
        }
        QueryState::Idle | QueryState::Loading => {
            Err(anyhow::anyhow!("market query did not complete"))
        }
    }
}

/// Plain-text report for a successful query.
pub(crate) fn render_report(
    location: &LocationSelector,
    result: &QueryResult,
    generated: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        format!("# Market report: {location}"),
        format!("Generated: {}", generated.format("%Y-%m-%d %H:%M UTC")),
        String::new(),
        result.summary.clone(),
        String::new(),
        "## Best-value produce".to_string(),
    ];

    for deal in &result.produce {
        let season = if deal.is_in_season() { "in season" } else { "out of season" };
        lines.push(format!(
            "- {} {} ({season}): {}",
            deal.name, deal.price_estimate, deal.reason
        ));
    }

    lines.push(String::new());
    lines.push("## Stores".to_string());
    for store in &result.stores {
        lines.push(format!(
            "- {} [{}]: {} ({})",
            store.name, store.category, store.highlights, store.accessibility
        ));
    }

    if let Some(comparisons) = result.shopping_comparison.as_deref() {
        lines.push(String::new());
        lines.push("## Shopping list comparison".to_string());
        lines.push(format!("{:<28}{:<14}", "STORE", "TOTAL"));
        for (point, comparison) in chart_series(comparisons).iter().zip(comparisons) {
            let marker = if point.is_lowest { "  <- lowest" } else { "" };
            let total = if point.total.is_some() {
                point.label.clone()
            } else {
                format!("{} (unparsed)", point.label)
            };
            lines.push(format!("{:<28}{total}{marker}", point.name));
            for item in &comparison.items {
                let notes = if item.notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", item.notes)
                };
                lines.push(format!("    {} {}{notes}", item.item_name, item.price));
            }
        }
    }

    if !result.sources.is_empty() {
        lines.push(String::new());
        lines.push("## Sources".to_string());
        for (i, source) in result.sources.iter().enumerate() {
            lines.push(format!("{}. {} <{}>", i + 1, source.title, source.uri));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
