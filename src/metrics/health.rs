use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMilestone {
    pub title: &'static str,
    pub description: &'static str,
    /// Human-readable time-after-quitting label.
    pub timeline: &'static str,
    pub threshold_days: u32,
    pub achieved: bool,
}

struct MilestoneDef {
    title: &'static str,
    description: &'static str,
    timeline: &'static str,
    threshold_days: u32,
}

// The "20 minutes" and "12 hours" entries are gated at a full day.
const MILESTONES: &[MilestoneDef] = &[
    MilestoneDef {
        title: "Better blood circulation",
        description: "Blood pressure and heart rate start returning to normal",
        timeline: "20 minutes",
        threshold_days: 1,
    },
    MilestoneDef {
        title: "Lower heart attack risk",
        description: "The risk of a heart attack starts to drop",
        timeline: "12 hours",
        threshold_days: 1,
    },
    MilestoneDef {
        title: "Better taste and smell",
        description: "Taste and smell begin to improve",
        timeline: "2-3 days",
        threshold_days: 3,
    },
    MilestoneDef {
        title: "Better circulation and lung function",
        description: "Circulation improves and lung function rises by 30%",
        timeline: "2-12 weeks",
        threshold_days: 14,
    },
    MilestoneDef {
        title: "Lower infection risk",
        description: "Less coughing, wheezing and breathing trouble",
        timeline: "1-9 months",
        threshold_days: 90,
    },
];

impl MilestoneDef {
    fn entry(&self, days_quit: u32) -> HealthMilestone {
        HealthMilestone {
            title: self.title,
            description: self.description,
            timeline: self.timeline,
            threshold_days: self.threshold_days,
            achieved: days_quit >= self.threshold_days,
        }
    }
}

/// Health improvements reached after `days_quit` smoke-free days, in
/// definition order. The list only grows as days increase.
pub fn health_timeline(days_quit: u32) -> Vec<HealthMilestone> {
    MILESTONES
        .iter()
        .filter(|m| days_quit >= m.threshold_days)
        .map(|m| m.entry(days_quit))
        .collect()
}

/// First milestone not yet reached.
pub fn next_milestone(days_quit: u32) -> Option<HealthMilestone> {
    MILESTONES
        .iter()
        .find(|m| days_quit < m.threshold_days)
        .map(|m| m.entry(days_quit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_on_day_zero() {
        assert!(health_timeline(0).is_empty());
        assert_eq!(next_milestone(0).unwrap().timeline, "20 minutes");
    }

    #[test]
    fn sub_day_entries_appear_after_one_day() {
        let timeline = health_timeline(1);
        let labels: Vec<_> = timeline.iter().map(|m| m.timeline).collect();
        assert_eq!(labels, vec!["20 minutes", "12 hours"]);
    }

    #[test]
    fn five_days_in() {
        let timeline = health_timeline(5);
        let labels: Vec<_> = timeline.iter().map(|m| m.timeline).collect();
        assert_eq!(labels, vec!["20 minutes", "12 hours", "2-3 days"]);
        assert!(timeline.iter().all(|m| m.achieved));
        assert_eq!(next_milestone(5).unwrap().threshold_days, 14);
    }

    #[test]
    fn full_timeline_after_ninety_days() {
        let timeline = health_timeline(90);
        assert_eq!(timeline.len(), 5);
        assert_eq!(timeline[4].title, "Lower infection risk");
        assert!(next_milestone(90).is_none());
    }

    #[test]
    fn list_only_grows() {
        let mut previous = 0;
        for day in 0..120 {
            let len = health_timeline(day).len();
            assert!(len >= previous);
            previous = len;
        }
    }
}
