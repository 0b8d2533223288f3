use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use wage_levels::comparison::ComparisonEngine;
use wage_levels::salary::parse_salary;
use wage_levels::wages::OccupationRecord;
use wage_levels::{Dataset, LevelClassifier, RegionalModel, TaxEngine, WageLevelEstimator};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engines built once from the loaded dataset and shared by every request.
#[derive(Debug, Clone)]
pub(crate) struct WageServices {
    pub(crate) catalog: Arc<Vec<OccupationRecord>>,
    pub(crate) estimator: WageLevelEstimator,
    pub(crate) comparison: ComparisonEngine,
}

impl WageServices {
    pub(crate) fn from_dataset(dataset: Dataset) -> Self {
        Self::with_model(dataset, RegionalModel::standard())
    }

    pub(crate) fn with_model(dataset: Dataset, model: RegionalModel) -> Self {
        let Dataset {
            catalog,
            table,
            cost_of_living,
        } = dataset;

        let classifier = LevelClassifier::new(Arc::new(model));
        Self {
            catalog: Arc::new(catalog),
            estimator: WageLevelEstimator::new(Arc::new(table), classifier),
            comparison: ComparisonEngine::new(TaxEngine::default(), Arc::new(cost_of_living)),
        }
    }

    /// Catalog title for an occupation code.
    pub(crate) fn occupation_title(&self, code: &str) -> Option<&str> {
        self.catalog
            .iter()
            .find(|record| record.code == code.trim())
            .map(|record| record.title.as_str())
    }
}

/// clap value parser for salary text such as `$108,000`.
pub(crate) fn parse_salary_arg(raw: &str) -> Result<i64, String> {
    parse_salary(raw).ok_or_else(|| format!("'{raw}' is not a non-negative salary amount"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_arguments_accept_formatted_text() {
        assert_eq!(parse_salary_arg("$108,000"), Ok(108_000));
        assert!(parse_salary_arg("a lot").is_err());
    }

    #[test]
    fn occupation_titles_come_from_the_catalog() {
        let dataset = Dataset {
            catalog: vec![OccupationRecord::new("15-1252", "Software Developers")],
            ..Dataset::default()
        };
        let services = WageServices::from_dataset(dataset);

        assert_eq!(
            services.occupation_title("15-1252"),
            Some("Software Developers")
        );
        assert_eq!(services.occupation_title(" 15-1252 "), Some("Software Developers"));
        assert_eq!(services.occupation_title("99-9999"), None);
    }
}
