//! Prompt templates for the assistant endpoints.
//!
//! Templates ask for plain numbered text because the rendered answers go
//! straight into the UI without a markdown pass.

use shared_types::HealthLog;

/// Optional profile preamble prepended to every health prompt so the
/// model can tailor its answer.
pub fn profile_context(
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    medical_conditions: Option<&str>,
) -> String {
    let mut parts = Vec::new();
    if let Some(h) = height_cm {
        parts.push(format!("Height: {h} cm"));
    }
    if let Some(w) = weight_kg {
        parts.push(format!("Weight: {w} kg"));
    }
    if let Some(c) = medical_conditions.filter(|c| !c.trim().is_empty()) {
        parts.push(format!("Medical conditions: {c}"));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("User Profile: {}.\n\n", parts.join("; "))
    }
}

pub fn calorie_estimate(meal: &str) -> String {
    format!(
        "You are a certified nutrition expert.\n\
         The user describes their meal as follows: \"{meal}\".\n\n\
         Please provide in plain text numbered format without markdown:\n\
         1. Total estimated calories\n\
         2. Breakdown of calories by main components (if identifiable)\n\
         3. Brief assessment of whether this portion is light, moderate, or heavy for an average adult\n\n\
         Respond clearly and concisely, without using asterisks, hashtags, dashes or markdown syntax."
    )
}

pub fn meal_plan(goal: &str, condition: Option<&str>) -> String {
    let condition = condition
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("not specified");
    format!(
        "You are a personal nutrition specialist.\n\
         User's goal: {goal}.\n\
         Current health status: {condition}.\n\n\
         Please suggest a 1-day meal plan in plain text numbered format without markdown:\n\
         1. Breakfast - suggest specific dishes and explain why they suit the goal and health status\n\
         2. Lunch - suggest specific dishes and explain why they suit the goal and health status\n\
         3. Dinner - suggest specific dishes and explain why they suit the goal and health status\n\
         4. Snacks (1-2) - suggest snacks and explain why they suit the goal and health status\n\n\
         Prefer common, locally available foods.\n\
         Respond without using asterisks, hashtags, dashes or markdown syntax."
    )
}

pub fn symptom_check(symptoms: &str) -> String {
    format!(
        "You are a health assistant.\n\
         The user describes their symptoms: \"{symptoms}\".\n\n\
         Please respond in plain text numbered format without markdown:\n\
         1. Possible causes (explained simply without overly technical terms)\n\
         2. Severity level (low, moderate, or high)\n\
         3. When to seek immediate medical attention\n\
         4. Safe home care suggestions (temporary measures only)\n\n\
         Important: Do not make definitive diagnoses. Always remind the user to see a healthcare \
         provider if symptoms worsen or persist.\n\
         Respond clearly without using asterisks, hashtags, dashes or markdown syntax."
    )
}

/// One summary line per log, oldest first, for the weekly-advice prompt.
pub fn weekly_summary_lines(logs: &[HealthLog]) -> String {
    logs.iter()
        .map(|log| {
            format!(
                "{}: sleep {}h, steps {}, calories {}, water {}L, mood {}/5",
                log.date,
                log.sleep_hours.unwrap_or(0.0),
                log.steps.unwrap_or(0),
                log.calories.unwrap_or(0),
                log.water_intake.unwrap_or(0.0),
                log.mood.unwrap_or(0),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn weekly_advice(summary_lines: &str) -> String {
    format!(
        "Below is a user's health data from the last 7 days:\n\n\
         {summary_lines}\n\n\
         Please provide in plain text numbered format without markdown:\n\
         1. Overall assessment of sleep quality, physical activity, nutrition, water intake, and mood\n\
         2. Identify unhealthy habits that need improvement\n\
         3. Suggest a concrete 7-day action plan with 3-5 specific, immediately actionable recommendations\n\
         4. Remind the user to consult a healthcare provider if they notice unusual or persistent symptoms\n\n\
         Respond clearly without using asterisks, hashtags, dashes or markdown syntax."
    )
}

/// Intent-detection prompt for the chat assistant. The model must answer
/// with bare JSON; `assistant::extract_json` digs it out regardless.
pub fn chat_intent(message: &str) -> String {
    format!(
        "You are an assistant for a productivity app.\n\n\
         Return ONLY valid JSON. No markdown. No explanations.\n\n\
         Detect user intent among:\n\
         - create_task\n\
         - create_project\n\
         - chat\n\n\
         If user wants to create a PROJECT but missing dates/duration, ask ONE short question:\n\
         {{\n  \"intent\": \"clarify_project_time\",\n  \"question\": \"...\"\n}}\n\n\
         If user wants to create a TASK but missing duration, ask ONE short question:\n\
         {{\n  \"intent\": \"clarify_task_time\",\n  \"question\": \"...\"\n}}\n\n\
         If user wants to create a PROJECT and time is clear or after clarification, return:\n\
         {{\n  \"intent\": \"create_project\",\n  \"name\": \"...\",\n  \"description\": \"\",\n  \
         \"estimated_duration_days\": number,\n  \"priority\": \"low|medium|high\",\n  \"tags\": []\n}}\n\n\
         If user wants to create a TASK and time is clear or after clarification, return:\n\
         {{\n  \"intent\": \"create_task\",\n  \"title\": \"...\",\n  \
         \"estimated_duration_minutes\": number,\n  \"tags\": []\n}}\n\n\
         Otherwise:\n\
         {{\n  \"intent\": \"chat\",\n  \"reply\": \"...\"\n}}\n\n\
         User message:\n\"{message}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn profile_context_joins_known_fields() {
        let ctx = profile_context(Some(170.0), Some(65.5), Some("asthma"));
        assert_eq!(
            ctx,
            "User Profile: Height: 170 cm; Weight: 65.5 kg; Medical conditions: asthma.\n\n"
        );
    }

    #[test]
    fn profile_context_empty_when_nothing_known() {
        assert_eq!(profile_context(None, None, None), "");
        assert_eq!(profile_context(None, None, Some("   ")), "");
    }

    #[test]
    fn weekly_summary_formats_one_line_per_log() {
        let logs = vec![
            HealthLog {
                log_id: 1,
                user_id: 1,
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                sleep_hours: Some(7.5),
                steps: Some(8000),
                calories: Some(2000),
                water_intake: Some(1.5),
                mood: Some(4),
            },
            HealthLog {
                log_id: 2,
                user_id: 1,
                date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                sleep_hours: None,
                steps: None,
                calories: None,
                water_intake: None,
                mood: None,
            },
        ];
        let lines = weekly_summary_lines(&logs);
        assert_eq!(
            lines,
            "2024-06-01: sleep 7.5h, steps 8000, calories 2000, water 1.5L, mood 4/5\n\
             2024-06-02: sleep 0h, steps 0, calories 0, water 0L, mood 0/5"
        );
    }

    #[test]
    fn chat_intent_embeds_the_user_message() {
        let prompt = chat_intent("remind me to water the plants");
        assert!(prompt.contains("\"remind me to water the plants\""));
        assert!(prompt.contains("create_task"));
        assert!(prompt.contains("clarify_project_time"));
    }
}
