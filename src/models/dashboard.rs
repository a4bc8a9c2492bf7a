//! Aggregate figures for the dashboard charts.

use std::collections::BTreeMap;

use super::{Lead, LeadStatus};

/// Per-status counters, always carrying all four statuses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusBreakdown<T> {
    pub new: T,
    pub contacted: T,
    pub converted: T,
    pub lost: T,
}

impl<T: Copy> StatusBreakdown<T> {
    pub fn get(&self, status: LeadStatus) -> T {
        match status {
            LeadStatus::New => self.new,
            LeadStatus::Contacted => self.contacted,
            LeadStatus::Converted => self.converted,
            LeadStatus::Lost => self.lost,
        }
    }

    fn slot(&mut self, status: LeadStatus) -> &mut T {
        match status {
            LeadStatus::New => &mut self.new,
            LeadStatus::Contacted => &mut self.contacted,
            LeadStatus::Converted => &mut self.converted,
            LeadStatus::Lost => &mut self.lost,
        }
    }

    /// `(status, value)` pairs in pipeline order, for chart series.
    pub fn series(&self) -> Vec<(LeadStatus, T)> {
        LeadStatus::ALL.iter().map(|s| (*s, self.get(*s))).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total_leads: usize,
    pub total_value: f64,
    pub leads_by_status: StatusBreakdown<usize>,
    pub value_by_status: StatusBreakdown<f64>,
    pub total_customers: usize,
}

impl DashboardStats {
    /// Aggregate the cached leads; `total_customers` is the cached count.
    pub fn compute(leads: &[Lead], total_customers: usize) -> Self {
        let mut stats = DashboardStats {
            total_leads: leads.len(),
            total_customers,
            ..Default::default()
        };

        for lead in leads {
            *stats.leads_by_status.slot(lead.status) += 1;
            *stats.value_by_status.slot(lead.status) += lead.value;
            stats.total_value += lead.value;
        }

        stats
    }

    /// Share of leads that converted, in `0.0..=1.0`.
    pub fn conversion_rate(&self) -> f64 {
        if self.total_leads == 0 {
            return 0.0;
        }
        self.leads_by_status.converted as f64 / self.total_leads as f64
    }

    /// Statuses with at least one lead, for the pie chart legend.
    pub fn non_empty_statuses(&self) -> BTreeMap<&'static str, usize> {
        self.leads_by_status
            .series()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| (status.as_str(), count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn lead(id: &str, status: LeadStatus, value: f64) -> Lead {
        Lead {
            id: id.to_string(),
            customer_id: "c1".to_string(),
            title: format!("Lead {}", id),
            description: String::new(),
            status,
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            customer: None,
        }
    }

    #[test]
    fn test_compute() {
        let leads = vec![
            lead("1", LeadStatus::New, 100.0),
            lead("2", LeadStatus::Converted, 250.0),
            lead("3", LeadStatus::Converted, 50.0),
            lead("4", LeadStatus::Lost, 10.0),
        ];
        let stats = DashboardStats::compute(&leads, 7);

        assert_eq!(stats.total_leads, 4);
        assert_eq!(stats.total_customers, 7);
        assert!((stats.total_value - 410.0).abs() < f64::EPSILON);
        assert_eq!(stats.leads_by_status.converted, 2);
        assert_eq!(stats.leads_by_status.contacted, 0);
        assert!((stats.value_by_status.converted - 300.0).abs() < f64::EPSILON);
        assert!((stats.conversion_rate() - 0.5).abs() < f64::EPSILON);
        assert_eq!(stats.non_empty_statuses().len(), 3);
    }

    #[test]
    fn test_empty() {
        let stats = DashboardStats::compute(&[], 0);
        assert_eq!(stats.total_leads, 0);
        assert_eq!(stats.conversion_rate(), 0.0);
        assert_eq!(stats.leads_by_status.series().len(), 4);
        assert!(stats.non_empty_statuses().is_empty());
    }
}
