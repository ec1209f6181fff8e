// Aggregation Logic
// Aggregates per-row analysis reports into a batch summary

use crate::models::{AnalysisReport, BatchSummary, DetectionResult, Label};

/// Aggregate reports (e.g. CSV rows) into a batch summary
pub fn aggregate_reports(reports: &[AnalysisReport]) -> BatchSummary {
    let detections: Vec<DetectionResult> = reports.iter().map(|r| r.detection).collect();
    aggregate_detections(&detections)
}

/// Label counts plus mean and max fake probability.
/// Unknown results are counted but excluded from the probability statistics.
pub fn aggregate_detections(detections: &[DetectionResult]) -> BatchSummary {
    let mut summary = BatchSummary {
        count: detections.len(),
        ..BatchSummary::default()
    };

    let mut scored = 0usize;
    let mut total_fake = 0.0;
    for d in detections {
        match d.label {
            Label::Fake => summary.fake_count += 1,
            Label::Real => summary.real_count += 1,
            Label::Unknown => {
                summary.unknown_count += 1;
                continue;
            }
        }
        scored += 1;
        total_fake += d.fake_probability;
        summary.max_fake_probability = summary.max_fake_probability.max(d.fake_probability);
    }

    if scored > 0 {
        summary.avg_fake_probability = (total_fake / scored as f64).clamp(0.0, 1.0);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_empty() {
        let result = aggregate_detections(&[]);
        assert_eq!(result, BatchSummary::default());
    }

    #[test]
    fn test_unknown_rows_excluded_from_average() {
        let detections = vec![
            DetectionResult::from_fake_probability(0.8),
            DetectionResult::from_fake_probability(0.4),
            DetectionResult::unknown(),
        ];
        let result = aggregate_detections(&detections);
        assert_eq!(result.count, 3);
        assert_eq!(result.fake_count, 1);
        assert_eq!(result.real_count, 1);
        assert_eq!(result.unknown_count, 1);
        assert!((result.avg_fake_probability - 0.6).abs() < 1e-9);
        assert!((result.max_fake_probability - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_all_unknown() {
        let result = aggregate_detections(&[DetectionResult::unknown(), DetectionResult::unknown()]);
        assert_eq!(result.unknown_count, 2);
        assert_eq!(result.avg_fake_probability, 0.0);
        assert_eq!(result.max_fake_probability, 0.0);
    }
}
