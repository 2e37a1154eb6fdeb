/// Encouragement for the given number of smoke-free days.
pub fn motivation_message(days_quit: u32) -> String {
    match days_quit {
        0 => "Today is day one! You have started an amazing journey! 💪".to_string(),
        1 => "Day two! You made it through the hardest first day! 🎉".to_string(),
        2..=6 => format!(
            "{} days! Your body is starting to flush out nicotine. Keep going! 🌟",
            days_quit
        ),
        7..=29 => format!(
            "{} days! Wonderful! Your sense of taste and smell is improving! 👃",
            days_quit
        ),
        30..=89 => format!(
            "{} days! Your circulation has improved significantly! You are amazing! ❤️",
            days_quit
        ),
        _ => format!(
            "{} days! You are a true warrior! Your lungs are recovering strongly! 🫁",
            days_quit
        ),
    }
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}
