use crate::infra::{parse_salary_arg, WageServices};
use clap::Args;
use std::path::PathBuf;
use wage_levels::comparison::{ComparisonSite, LocationTakeHome};
use wage_levels::config::AppConfig;
use wage_levels::error::AppError;
use wage_levels::geography::CountyLocation;
use wage_levels::wages::FixedVariation;
use wage_levels::{
    telemetry, DataPipeline, Dataset, RegionalModel, TaxBreakdown, TaxEngine, WageQuery,
};

const SKIPPED_PREVIEW: usize = 10;

#[derive(Args, Debug, Default)]
pub(crate) struct GenerateArgs {
    /// Occupation catalog CSV (defaults to APP_OCCUPATIONS_CSV)
    #[arg(long)]
    pub(crate) occupations: Option<PathBuf>,
    /// Area wage export CSV with hourly wages (defaults to APP_WAGES_CSV)
    #[arg(long)]
    pub(crate) wages: Option<PathBuf>,
    /// Directory receiving occupations.json and wages.json (defaults to APP_DATA_DIR)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Annual salary; accepts text such as "$108,000"
    #[arg(long, value_parser = parse_salary_arg)]
    pub(crate) salary: i64,
    /// Five digit county FIPS code
    #[arg(long)]
    pub(crate) county: String,
    /// SOC occupation code used for the wage table lookup
    #[arg(long)]
    pub(crate) occupation: Option<String>,
    /// Wage survey area code used for the wage table lookup
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Fix the sub-area variation (0 to 1) instead of drawing it
    #[arg(long)]
    pub(crate) variation: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct TakeHomeArgs {
    /// Annual salary; accepts text such as "$108,000"
    #[arg(long, value_parser = parse_salary_arg)]
    pub(crate) salary: i64,
    /// Two letter state code
    #[arg(long)]
    pub(crate) state: String,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Annual salary; accepts text such as "$108,000"
    #[arg(long, value_parser = parse_salary_arg)]
    pub(crate) salary: i64,
    #[arg(long)]
    pub(crate) from_area: String,
    #[arg(long)]
    pub(crate) from_state: String,
    #[arg(long)]
    pub(crate) to_area: String,
    #[arg(long)]
    pub(crate) to_state: String,
}

fn load_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let GenerateArgs {
        occupations,
        wages,
        out_dir,
    } = args;

    let occupations = occupations.unwrap_or(config.data.occupations_csv);
    let wages = wages.unwrap_or(config.data.wages_csv);
    let out_dir = out_dir.unwrap_or(config.data.data_dir);

    let generated = DataPipeline::run(&occupations, &wages)?;
    let paths = generated.write_artifacts(&out_dir)?;
    let report = &generated.report;

    println!("Wage data generation");
    println!(
        "- {} occupations with wage data (of {} catalog rows)",
        report.catalog_size, report.occupation_rows
    );
    println!(
        "- {} wage entries across {} areas (of {} export rows)",
        report.wage_entries, report.area_count, report.wage_rows
    );
    println!("- finished in {} ms", report.elapsed().num_milliseconds());
    println!("- wrote {}", paths.occupations.display());
    println!("- wrote {}", paths.wages.display());

    if !report.skipped.is_empty() {
        println!("Skipped {} malformed rows:", report.skipped_count());
        for row in report.skipped.iter().take(SKIPPED_PREVIEW) {
            println!("  - {row}");
        }
        if report.skipped_count() > SKIPPED_PREVIEW {
            println!("  ... {} more", report.skipped_count() - SKIPPED_PREVIEW);
        }
    }

    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let dataset = Dataset::load(&config.data.data_dir)?;
    let model = match args.variation {
        Some(variation) => RegionalModel::with_source(FixedVariation(variation)),
        None => RegionalModel::standard(),
    };
    let services = WageServices::with_model(dataset, model);

    let query = WageQuery {
        salary: args.salary,
        occupation_code: args.occupation,
        area_code: args.area,
        county: CountyLocation::from_fips(&args.county),
    };
    let estimate = services.estimator.estimate(&query);

    let place = estimate
        .state_name
        .map(|name| format!("{} ({name})", query.county.fips))
        .unwrap_or_else(|| query.county.fips.clone());
    println!("Wage level for ${} in county {place}", args.salary);
    if let Some(code) = &query.occupation_code {
        let title = services
            .occupation_title(code)
            .unwrap_or("unknown occupation");
        println!("- occupation: {code} {title}");
    }
    println!("- {} (thresholds from {:?})", estimate.label, estimate.source);
    println!("- level 1: ${}", estimate.thresholds.level1);
    println!("- level 2: ${}", estimate.thresholds.level2);
    println!("- level 3: ${}", estimate.thresholds.level3);
    if let Some(level4) = estimate.level4 {
        println!("- level 4: ${level4}");
    }

    Ok(())
}

pub(crate) fn run_take_home(args: TakeHomeArgs) -> Result<(), AppError> {
    let breakdown = TaxEngine::default().take_home(args.salary, &args.state);

    println!(
        "Take-home pay for ${} in {}",
        args.salary,
        args.state.to_ascii_uppercase()
    );
    render_breakdown(&breakdown);
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let services = WageServices::from_dataset(Dataset::load(&config.data.data_dir)?);

    let from = ComparisonSite::new(args.from_area, args.from_state);
    let to = ComparisonSite::new(args.to_area, args.to_state);
    let comparison = services
        .comparison
        .compare_take_home(args.salary, &from, &to);

    println!("Purchasing power of ${}", args.salary);
    render_location(&from, &comparison.location1);
    render_location(&to, &comparison.location2);
    println!(
        "Difference: ${} ({:+.1}%)",
        comparison.difference, comparison.percent_difference
    );
    Ok(())
}

fn render_location(site: &ComparisonSite, location: &LocationTakeHome) {
    println!(
        "\nArea {} / {} (cost of living {:.1})",
        site.area_code, site.state_code, location.col_index
    );
    render_breakdown(&location.breakdown);
    println!("- purchasing power: ${}", location.purchasing_power);
}

fn render_breakdown(breakdown: &TaxBreakdown) {
    println!("- federal tax: ${}", breakdown.federal_tax);
    println!(
        "- state tax: ${} ({:.2}%)",
        breakdown.state_tax,
        breakdown.state_rate * 100.0
    );
    println!("- payroll tax: ${}", breakdown.payroll_tax);
    println!(
        "- total tax: ${} ({:.1}% effective)",
        breakdown.total_tax, breakdown.effective_rate
    );
    println!("- take-home: ${}", breakdown.take_home);
}
