// ABOUTME: View models rendered by the admin dashboard pages and fragments
// ABOUTME: Supplies the sample dashboard, activity feed, and user table data

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub subtitle: String,
    pub user: DashboardUser,
    pub stats: Vec<Stat>,
    pub activities: Vec<Activity>,
    pub breadcrumb: Vec<BreadcrumbItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardUser {
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub title: String,
    pub value: String,
    pub change: String,
    pub icon: String,
    pub kind: Trend,
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub title: String,
    pub description: String,
    pub time: DateTime<Utc>,
    pub kind: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreadcrumbItem {
    pub title: String,
    pub url: String,
    pub active: bool,
}

/// Row in the users table fragment.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

fn stat(title: &str, value: &str, change: &str, icon: &str, kind: Trend) -> Stat {
    Stat {
        title: title.to_string(),
        value: value.to_string(),
        change: change.to_string(),
        icon: icon.to_string(),
        kind,
    }
}

fn activity(
    now: DateTime<Utc>,
    minutes_ago: i64,
    title: &str,
    description: &str,
    kind: &str,
    icon: &str,
) -> Activity {
    Activity {
        title: title.to_string(),
        description: description.to_string(),
        time: now - Duration::minutes(minutes_ago),
        kind: kind.to_string(),
        icon: icon.to_string(),
    }
}

impl Dashboard {
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            title: "Panelkit Dashboard".to_string(),
            subtitle: "Welcome to the Panelkit admin dashboard".to_string(),
            user: DashboardUser {
                name: "Administrator".to_string(),
                role: "System Admin".to_string(),
                avatar: None,
            },
            stats: vec![
                stat("Active Users", "3,247", "+18% from last month", "users", Trend::Positive),
                stat("Total Revenue", "$89,320", "+12% from last month", "dollar-sign", Trend::Positive),
                stat("System Load", "67%", "-5% from last week", "cpu", Trend::Negative),
                stat("Response Time", "234ms", "Optimal performance", "zap", Trend::Neutral),
            ],
            activities: vec![
                activity(now, 10, "New user registration", "user@example.com joined the platform", "user", "user-plus"),
                activity(now, 60, "System backup completed", "Daily backup finished successfully", "system", "server"),
            ],
            breadcrumb: vec![
                BreadcrumbItem {
                    title: "Home".to_string(),
                    url: "/".to_string(),
                    active: false,
                },
                BreadcrumbItem {
                    title: "Dashboard".to_string(),
                    url: "/dashboard".to_string(),
                    active: true,
                },
            ],
        }
    }
}

impl Activity {
    /// Feed shown by the activity fragment, newest first.
    pub fn recent(now: DateTime<Utc>) -> Vec<Self> {
        vec![
            activity(now, 5, "New user registered", "john.doe@example.com joined the platform", "user", "user-plus"),
            activity(now, 15, "Report generated", "Monthly analytics report completed", "report", "file-text"),
            activity(now, 60, "System backup", "Automated backup completed successfully", "system", "database"),
            activity(now, 120, "Payment received", "$249.99 payment from Acme Corp", "payment", "credit-card"),
        ]
    }
}

impl UserRow {
    pub fn sample() -> Vec<Self> {
        let row = |name: &str, email: &str, role: &str, active: bool| Self {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            active,
        };
        vec![
            row("Administrator", "admin@example.com", "System Admin", true),
            row("Jane Cooper", "jane.cooper@example.com", "Editor", true),
            row("Wade Warren", "wade.warren@example.com", "Viewer", false),
        ]
    }
}
