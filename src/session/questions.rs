//! Default interview question list, fixed length and order.

pub fn default_questions() -> Vec<String> {
    [
        "Can you describe your experience with large-scale system architecture?",
        "How do you handle high-pressure situations with conflicting deadlines?",
        "Tell me about a time you had to deal with a difficult team member.",
        "What is your greatest technical achievement to date?",
        "Why do you believe you are the best fit for this role?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
