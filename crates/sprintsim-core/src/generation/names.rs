//! Fixed vocabularies used by the generators and event narration.

use crate::components::Role;

/// Role cycle applied by index: three developers, then one each of the rest.
pub static ROLE_CYCLE: &[Role] = &[
    Role::Developer,
    Role::Developer,
    Role::Developer,
    Role::ScrumMaster,
    Role::ProductOwner,
    Role::QAEngineer,
];

pub static SKILLS: &[&str] = &[
    "JavaScript",
    "React",
    "Node.js",
    "Python",
    "Java",
    "SQL",
    "AWS",
    "Docker",
    "Testing",
    "Agile",
];

/// Story titles, cycled by index. Titles repeat once the backlog is longer
/// than this list.
pub static STORY_TEMPLATES: &[&str] = &[
    "Implement user authentication system",
    "Create dashboard for data visualization",
    "Add payment processing functionality",
    "Implement real-time notifications",
    "Create admin panel for user management",
    "Add search functionality with filters",
    "Implement file upload and storage",
    "Create reporting system",
    "Add multi-language support",
    "Implement API rate limiting",
];

pub static IMPEDIMENT_DESCRIPTIONS: &[&str] = &[
    "Technical infrastructure issues",
    "Team member unavailability",
    "External dependency delays",
    "Requirements clarification needed",
    "Environment setup problems",
];

/// Display name for the `index`-th (zero-based) member.
pub fn member_name(index: usize) -> String {
    format!("Team Member {}", index + 1)
}

/// Title of the `index`-th backlog item.
pub fn story_title(index: usize) -> &'static str {
    STORY_TEMPLATES[index % STORY_TEMPLATES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_cycle() {
        assert_eq!(story_title(0), story_title(STORY_TEMPLATES.len()));
        assert_ne!(story_title(0), story_title(1));
    }

    #[test]
    fn test_member_name_is_one_based() {
        assert_eq!(member_name(0), "Team Member 1");
    }
}
