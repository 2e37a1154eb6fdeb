use serde::Serialize;
use std::str::FromStr;

/// Which cumulative metric a badge ladder is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    Days,
    Money,
}

impl BadgeKind {
    pub fn all() -> [BadgeKind; 2] {
        [BadgeKind::Days, BadgeKind::Money]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeKind::Days => "days",
            BadgeKind::Money => "money",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BadgeKind::Days => "Smoke-free days",
            BadgeKind::Money => "Money saved",
        }
    }

    pub fn ladder(&self) -> &'static [Badge] {
        match self {
            BadgeKind::Days => DAY_BADGES,
            BadgeKind::Money => MONEY_BADGES,
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BadgeKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" | "day" => Ok(BadgeKind::Days),
            "money" => Ok(BadgeKind::Money),
            _ => Err(anyhow::anyhow!("Unknown badge type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub threshold: f64,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const DAY_BADGES: &[Badge] = &[
    Badge { threshold: 1.0, icon: "🌱", title: "Sprout", description: "First day" },
    Badge { threshold: 7.0, icon: "🌿", title: "Seedling", description: "One week smoke-free" },
    Badge { threshold: 30.0, icon: "🌳", title: "Sapling", description: "One month smoke-free" },
    Badge { threshold: 90.0, icon: "🏆", title: "Warrior", description: "Three months smoke-free" },
    Badge { threshold: 365.0, icon: "👑", title: "Master", description: "One year smoke-free" },
];

// Thresholds are in VND.
const MONEY_BADGES: &[Badge] = &[
    Badge { threshold: 100_000.0, icon: "💰", title: "First savings", description: "Saved 100K" },
    Badge { threshold: 500_000.0, icon: "💎", title: "Small treasure", description: "Saved 500K" },
    Badge { threshold: 1_000_000.0, icon: "🏦", title: "Little millionaire", description: "Saved 1M" },
    Badge { threshold: 5_000_000.0, icon: "💸", title: "Big spender", description: "Saved 5M" },
];

/// Highest-tier badge whose threshold `value` has reached, if any.
pub fn badge_for(kind: BadgeKind, value: f64) -> Option<&'static Badge> {
    kind.ladder().iter().filter(|b| value >= b.threshold).last()
}

/// Every tier reached so far, lowest first.
pub fn earned_badges(kind: BadgeKind, value: f64) -> Vec<&'static Badge> {
    kind.ladder().iter().filter(|b| value >= b.threshold).collect()
}

/// The next tier still ahead, or `None` once the ladder is complete.
pub fn next_badge(kind: BadgeKind, value: f64) -> Option<&'static Badge> {
    kind.ladder().iter().find(|b| value < b.threshold)
}
