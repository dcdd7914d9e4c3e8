use crate::domain::{ReviewOptions, ReviewTask};

fn task_instruction(task: &ReviewTask) -> String {
    match task {
        ReviewTask::Summarize => "Summarize the restaurant menu in this photo. List the main \
             sections and highlight the most notable dishes."
            .to_string(),
        ReviewTask::Detailed => "Write a detailed review of the restaurant menu in this photo. \
             Describe each section, the notable dishes with their main ingredients, and the \
             overall price range."
            .to_string(),
        ReviewTask::SimpleMenu => "Rewrite the restaurant menu in this photo as a simple, \
             easy-to-read list of dishes, each with a short plain-language description."
            .to_string(),
        ReviewTask::Recommendation => "Recommend the best dishes from the restaurant menu in \
             this photo and briefly explain each choice."
            .to_string(),
        ReviewTask::Custom(instruction) => instruction.clone(),
    }
}

/// Builds the engine prompt. Option values are inserted verbatim.
pub fn build_review_prompt(options: &ReviewOptions) -> String {
    let mut lines = vec![
        task_instruction(&options.task),
        format!("Respond in {}.", options.language),
    ];

    if let Some(restrictions) = &options.dietary_restrictions {
        lines.push(format!(
            "The diner follows these dietary restrictions: {}. Point out which dishes fit them.",
            restrictions
        ));
    }
    if let Some(allergies) = &options.allergies {
        lines.push(format!(
            "The diner is allergic to: {}. Flag any dish that may contain these allergens.",
            allergies
        ));
    }
    if let Some(culture) = &options.culture {
        lines.push(format!(
            "Take the diner's cultural background into account: {}.",
            culture
        ));
    }

    lines.join("\n")
}
