//! Fleet-level rollup of machine reports

use serde::{Deserialize, Serialize};

use crate::engine::MachineReport;
use crate::types::Severity;

/// Machines whose RUL is below this many hours count as at risk.
pub const AT_RISK_RUL_HOURS: u32 = 168;

/// How many of the least healthy machines are listed
pub const WORST_MACHINES_LISTED: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetMachine {
    pub machine_id: String,
    pub health_score: f64,
    pub rul_hours: u32,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FleetSummary {
    pub total_machines: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub avg_health: f64,
    pub avg_rul_hours: f64,
    /// Machines not in the healthy band
    pub open_alerts: usize,
    pub machines_at_risk: usize,
    /// Least healthy first
    pub worst_machines: Vec<FleetMachine>,
}

pub fn summarize_fleet(reports: &[MachineReport]) -> FleetSummary {
    if reports.is_empty() {
        return FleetSummary::default();
    }

    let count_of = |severity: Severity| {
        reports
            .iter()
            .filter(|r| r.insights.severity == severity)
            .count()
    };
    let healthy = count_of(Severity::Healthy);
    let warning = count_of(Severity::Warning);
    let critical = count_of(Severity::Critical);

    let n = reports.len() as f64;
    let avg_health = reports.iter().map(|r| r.insights.health_score).sum::<f64>() / n;
    let avg_rul_hours = reports
        .iter()
        .map(|r| f64::from(r.insights.rul_hours))
        .sum::<f64>()
        / n;
    let machines_at_risk = reports
        .iter()
        .filter(|r| r.insights.rul_hours < AT_RISK_RUL_HOURS)
        .count();

    let mut worst_machines: Vec<FleetMachine> = reports
        .iter()
        .map(|r| FleetMachine {
            machine_id: r.machine_id.clone(),
            health_score: r.insights.health_score,
            rul_hours: r.insights.rul_hours,
            severity: r.insights.severity,
        })
        .collect();
    worst_machines.sort_by(|a, b| a.health_score.total_cmp(&b.health_score));
    worst_machines.truncate(WORST_MACHINES_LISTED);

    FleetSummary {
        total_machines: reports.len(),
        healthy,
        warning,
        critical,
        avg_health,
        avg_rul_hours,
        open_alerts: warning + critical,
        machines_at_risk,
        worst_machines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConditionEngine;
    use crate::types::MetricSample;
    use chrono::{Duration, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn report(id: &str, rms: f64, crest: f64) -> MachineReport {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().unwrap();
        let samples = vec![
            MetricSample::new(now - Duration::minutes(1), rms, rms * crest, crest),
            MetricSample::new(now, rms, rms * crest, crest),
        ];
        ConditionEngine::default()
            .analyze_at(id, &samples, now, &mut StdRng::seed_from_u64(0))
            .unwrap()
    }

    #[test]
    fn test_empty_fleet() {
        assert_eq!(summarize_fleet(&[]), FleetSummary::default());
    }

    #[test]
    fn test_counts_and_ordering() {
        // health: 92, 60, 20
        let reports = vec![
            report("m1", 0.2, 1.5),
            report("m2", 1.0, 3.0),
            report("m3", 2.0, 3.0),
        ];
        let summary = summarize_fleet(&reports);
        assert_eq!(summary.total_machines, 3);
        assert_eq!(summary.healthy, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.open_alerts, 2);
        // RUL 720, 168, 24: only the last is under 168
        assert_eq!(summary.machines_at_risk, 1);
        assert!((summary.avg_health - (92.0 + 60.0 + 20.0) / 3.0).abs() < 1e-9);
        let order: Vec<&str> = summary
            .worst_machines
            .iter()
            .map(|m| m.machine_id.as_str())
            .collect();
        assert_eq!(order, vec!["m3", "m2", "m1"]);
    }
}
