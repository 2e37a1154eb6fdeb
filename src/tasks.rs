use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;

use crate::db::repository::{StageRepo, TaskRepo};
use crate::models::{NewTask, QuitPlan, Stage, Task, TaskPriority, TaskType};
use crate::session::Session;

struct Template {
    offset_days: i64,
    title: &'static str,
    description: &'static str,
    task_type: TaskType,
    priority: TaskPriority,
    points: u32,
}

/// Habit and milestone tasks laid out from the plan start.
const PLAN_TEMPLATES: &[Template] = &[
    Template {
        offset_days: 0,
        title: "Clear out cigarettes and lighters",
        description: "Remove every pack, lighter and ashtray from home, car and bag",
        task_type: TaskType::HabitBuilding,
        priority: TaskPriority::High,
        points: 10,
    },
    Template {
        offset_days: 0,
        title: "Tell someone about your plan",
        description: "Ask a friend or family member to check in on you",
        task_type: TaskType::HabitBuilding,
        priority: TaskPriority::Medium,
        points: 5,
    },
    Template {
        offset_days: 2,
        title: "Breathing exercise",
        description: "Take ten slow deep breaths whenever a craving hits",
        task_type: TaskType::HabitBuilding,
        priority: TaskPriority::Medium,
        points: 5,
    },
    Template {
        offset_days: 7,
        title: "Review your first week",
        description: "Look back at your records and note what triggered cravings",
        task_type: TaskType::Milestone,
        priority: TaskPriority::Medium,
        points: 10,
    },
    Template {
        offset_days: 30,
        title: "One month check-in",
        description: "Compare today's count with where you started",
        task_type: TaskType::Milestone,
        priority: TaskPriority::Medium,
        points: 15,
    },
];

const DAILY_TEMPLATES: &[Template] = &[
    Template {
        offset_days: 0,
        title: "Record today's progress",
        description: "Log how many cigarettes you smoked today",
        task_type: TaskType::Daily,
        priority: TaskPriority::High,
        points: 5,
    },
    Template {
        offset_days: 0,
        title: "Drink enough water",
        description: "At least 8 glasses to help flush out nicotine",
        task_type: TaskType::Daily,
        priority: TaskPriority::Medium,
        points: 3,
    },
];

fn create_missing(
    conn: &Connection,
    session: &Session,
    candidates: Vec<NewTask>,
) -> Result<Vec<Task>> {
    let mut created = Vec::new();
    for task in candidates {
        if TaskRepo::exists(conn, session.user_id, task.plan_id, &task.title, task.due_date)? {
            continue;
        }
        created.push(TaskRepo::create(conn, session.user_id, &task)?);
    }
    Ok(created)
}

/// Lay out a plan's checklist: templates that fall before the target date,
/// one task per stage end and the quit day itself. Tasks already present are
/// left alone, so this is safe to re-run after adding stages.
pub fn generate_for_plan(conn: &Connection, session: &Session, plan: &QuitPlan) -> Result<Vec<Task>> {
    let mut candidates: Vec<NewTask> = PLAN_TEMPLATES
        .iter()
        .map(|t| (t, plan.start_date + Duration::days(t.offset_days)))
        .filter(|(_, due)| *due < plan.target_quit_date)
        .map(|(t, due)| NewTask {
            plan_id: Some(plan.id),
            title: t.title.to_string(),
            description: t.description.to_string(),
            task_type: t.task_type,
            priority: t.priority,
            due_date: Some(due),
            points_reward: t.points,
        })
        .collect();

    for stage in StageRepo::list_for_plan(conn, plan.id)? {
        candidates.push(stage_task(&stage));
    }

    candidates.push(NewTask {
        plan_id: Some(plan.id),
        title: "Quit day".to_string(),
        description: format!("Your target date for {}. {}", plan.name, plan.reason),
        task_type: TaskType::Milestone,
        priority: TaskPriority::High,
        due_date: Some(plan.target_quit_date),
        points_reward: 20,
    });

    let created = create_missing(conn, session, candidates)?;
    log::info!("Generated {} tasks for plan {}", created.len(), plan.id);
    Ok(created)
}

fn stage_task(stage: &Stage) -> NewTask {
    NewTask {
        plan_id: Some(stage.plan_id),
        title: format!("Finish stage {}: {}", stage.stage_number, stage.title),
        description: stage.description.clone(),
        task_type: TaskType::Milestone,
        priority: TaskPriority::Medium,
        due_date: Some(stage.end_date),
        points_reward: 10,
    }
}

/// Milestone task for a newly added stage. `None` if it already exists.
pub fn add_stage_task(conn: &Connection, session: &Session, stage: &Stage) -> Result<Option<Task>> {
    Ok(create_missing(conn, session, vec![stage_task(stage)])?.pop())
}

/// The day's routine tasks, created once per date.
pub fn generate_daily(conn: &Connection, session: &Session, date: NaiveDate) -> Result<Vec<Task>> {
    let candidates = DAILY_TEMPLATES
        .iter()
        .map(|t| NewTask {
            plan_id: None,
            title: t.title.to_string(),
            description: t.description.to_string(),
            task_type: t.task_type,
            priority: t.priority,
            due_date: Some(date),
            points_reward: t.points,
        })
        .collect();
    create_missing(conn, session, candidates)
}
