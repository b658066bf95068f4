use crate::infra::{parse_date, start_of_day, InMemoryTenderRepository};
use chrono::{NaiveDate, Utc};
use clap::Args;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tender_intel::error::AppError;
use tender_intel::workflows::tenders::{
    sample_catalog, CompetitorModel, ModelConfig, TemporalValue, TenderIntelService,
    TenderQuery, TenderRecord, ThreatLevel,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Estimated contract value in rupees
    #[arg(long, default_value_t = 0.0)]
    pub(crate) estimated_value: f64,
    /// Earnest money deposit in rupees
    #[arg(long, default_value_t = 0.0)]
    pub(crate) emd_amount: f64,
    #[arg(long, default_value = "IT Services")]
    pub(crate) category: String,
    #[arg(long, default_value = "New Delhi")]
    pub(crate) location: String,
    /// Publication date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) published: Option<NaiveDate>,
    /// Submission deadline (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) deadline: Option<NaiveDate>,
    /// JSON file of weight overrides keyed by feature name
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Competitor roster as JSON or CSV
    #[arg(long)]
    pub(crate) competitors: Option<PathBuf>,
    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Anchor date for the sample catalog (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print every competitor row for each tender
    #[arg(long)]
    pub(crate) verbose: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        estimated_value,
        emd_amount,
        category,
        location,
        published,
        deadline,
        weights,
        competitors,
        json,
    } = args;

    let record = TenderRecord {
        estimated_value,
        emd_amount,
        category,
        location,
        published_date: published.map(TemporalValue::from),
        submission_deadline: deadline.map(TemporalValue::from),
    };
    record.validate()?;

    let model = CompetitorModel::new(ModelConfig::load(
        weights.as_deref(),
        competitors.as_deref(),
    ));
    let features = model.featurize(&record);
    let base_score = model.base_score(&record);
    let assessments = model.predict(&record);
    let narrative = tender_intel::workflows::tenders::competitors::narrate(&assessments);

    if json {
        let features: BTreeMap<&str, f64> = features
            .iter()
            .map(|(kind, value)| (kind.key(), value))
            .collect();
        let payload = json!({
            "features": features,
            "base_score": base_score,
            "competitors": assessments,
            "market_analysis": narrative,
        });
        let rendered = serde_json::to_string_pretty(&payload).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Tender features");
    for (kind, value) in features.iter() {
        println!("  {:<20} {:>10.4}", kind.key(), value);
    }
    println!("Base score: {base_score:.4}");
    println!();
    println!(
        "{:<24} {:>9} {:>9} {:>8} {:>7}",
        "Competitor", "Win %", "Margin %", "Threat", "Score"
    );
    for row in &assessments {
        println!(
            "{:<24} {:>9.1} {:>9.1} {:>8} {:>7.3}",
            row.name,
            row.win_rate_pct,
            row.avg_margin_pct,
            row.threat.label(),
            row.threat_score
        );
    }
    println!();
    println!("{narrative}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, verbose } = args;
    let now = today.map(start_of_day).unwrap_or_else(Utc::now);

    let service = TenderIntelService::new(
        Arc::new(InMemoryTenderRepository::default()),
        CompetitorModel::default(),
    );
    let imported = service.import(sample_catalog(now))?;
    println!("Tender intelligence demo");
    println!("Imported {imported} sample tenders anchored at {}", now.date_naive());

    let tenders = service.list(&TenderQuery {
        limit: imported,
        ..TenderQuery::default()
    })?;

    let mut tally: BTreeMap<ThreatLevel, usize> = BTreeMap::new();
    for tender in &tenders {
        let analysis = service.analyze_competitors(&tender.id)?;
        let level = ThreatLevel::highest(&analysis.competitors);
        *tally.entry(level).or_default() += 1;

        println!(
            "\n{} | {} | {} | INR {:.0}",
            tender.tender_id, tender.category, tender.location, tender.estimated_value
        );
        println!(
            "  threat {:<6} {}",
            analysis.threat_level,
            analysis.outlook.message()
        );
        if verbose {
            for row in &analysis.competitors {
                println!(
                    "    {:<22} {:>6} {:.3}",
                    row.name,
                    row.threat.label(),
                    row.threat_score
                );
            }
        }
    }

    println!("\nThreat summary");
    for level in [ThreatLevel::High, ThreatLevel::Medium, ThreatLevel::Low] {
        println!(
            "  {:<6} {}",
            level.label(),
            tally.get(&level).copied().unwrap_or(0)
        );
    }
    Ok(())
}
