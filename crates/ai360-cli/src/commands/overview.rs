use std::fmt::Write as _;

use ai360_core::profile::UserProfile;
use ai360_core::views::DashboardSection;
use ai360_store::UsageStats;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{self, TableOptions, table};

#[derive(Debug, Serialize)]
pub struct SectionEntry {
    pub section: DashboardSection,
    pub command: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OverviewReport {
    pub profile: UserProfile,
    pub guest: bool,
    pub usage: UsageStats,
    pub sections: Vec<SectionEntry>,
}

const fn command_for(section: DashboardSection) -> &'static str {
    match section {
        DashboardSection::Overview => "ai360 overview",
        DashboardSection::Diagnosis => "ai360 diagnose <IMAGE>",
        DashboardSection::Prediction => "ai360 predict",
        DashboardSection::ReportExplainer => "ai360 report <IMAGE>",
        DashboardSection::Chatbot => "ai360 chat <MESSAGE>",
    }
}

impl OverviewReport {
    fn build(profile: UserProfile, usage: UsageStats) -> Self {
        Self {
            guest: profile.is_guest(),
            profile,
            usage,
            sections: DashboardSection::ALL
                .iter()
                .map(|&section| SectionEntry {
                    section,
                    command: command_for(section),
                })
                .collect(),
        }
    }

    fn table(&self, options: TableOptions) -> String {
        let last_activity = self.usage.last_activity.map_or_else(
            || "No activity yet.".to_string(),
            |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        let mut out = table::render_pairs(
            &[
                ("name", self.profile.name.clone()),
                ("email", self.profile.email.clone()),
                (
                    "access",
                    String::from(if self.guest {
                        "Guest Access"
                    } else {
                        "Verified Profile"
                    }),
                ),
                ("scans", self.usage.scans.to_string()),
                ("reports", self.usage.reports.to_string()),
                ("last activity", last_activity),
            ],
            options,
        );

        let rows = self
            .sections
            .iter()
            .map(|entry| vec![entry.section.to_string(), entry.command.to_string()])
            .collect::<Vec<_>>();
        let _ = write!(
            out,
            "\n\n{}",
            table::render_table(&["section", "command"], &rows, options)
        );
        out
    }
}

/// Handle `ai360 overview`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let profile = ctx.require_profile()?;
    let report = OverviewReport::build(profile, ctx.usage().stats());
    output::output(&report, flags.format, OverviewReport::table)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn lists_every_dashboard_section() {
        let report = OverviewReport::build(UserProfile::default(), UsageStats::default());
        assert_eq!(report.sections.len(), DashboardSection::ALL.len());
        let out = report.table(TableOptions::PLAIN);
        assert!(out.contains("REPORT_EXPLAINER"));
        assert!(out.contains("ai360 chat <MESSAGE>"));
        assert!(out.contains("No activity yet."));
    }

    #[test]
    fn shows_counters_and_last_activity() {
        let usage = UsageStats {
            scans: 4,
            reports: 2,
            last_activity: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single(),
        };
        let profile = UserProfile {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            ..UserProfile::default()
        };
        let out = OverviewReport::build(profile, usage).table(TableOptions::PLAIN);
        assert!(out.lines().any(|l| l.starts_with("scans") && l.ends_with('4')));
        assert!(out.contains("2026-03-01 09:30 UTC"));
        assert!(out.contains("Verified Profile"));
    }
}
