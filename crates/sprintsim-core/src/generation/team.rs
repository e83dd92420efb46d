//! Team roster generation

use crate::components::{Role, TeamMember};
use crate::rng::RandomSource;

use super::names::{member_name, ROLE_CYCLE, SKILLS};

/// Experience floor in years.
pub const MIN_EXPERIENCE: f64 = 0.5;

/// Generate `size` team members around an average experience.
///
/// Per member, in draw order: experience (`avg ± 2`, floored at 0.5),
/// availability (`0.7–0.9`), then the skill draws.
pub fn generate_team(
    size: u32,
    avg_experience: f64,
    rng: &mut impl RandomSource,
) -> Vec<TeamMember> {
    let mut team = Vec::with_capacity(size as usize);

    for i in 0..size as usize {
        let experience = (avg_experience + rng.jitter(4.0)).max(MIN_EXPERIENCE);
        let availability = 0.8 + rng.jitter(0.2);
        let role = role_for_slot(i);
        let skills = generate_skills(experience, rng);

        team.push(TeamMember {
            id: format!("member-{}", i),
            name: member_name(i),
            role,
            experience,
            availability,
            skills,
        });
    }

    team
}

/// Role for the `index`-th roster slot.
pub fn role_for_slot(index: usize) -> Role {
    ROLE_CYCLE[index % ROLE_CYCLE.len()]
}

/// Sample skills with replacement and drop repeats.
///
/// The target is `floor(experience * 2) + 2`, capped at the vocabulary size;
/// duplicates mean the realized list can be shorter.
pub fn generate_skills(experience: f64, rng: &mut impl RandomSource) -> Vec<String> {
    let target = ((experience * 2.0).floor() as usize + 2).min(SKILLS.len());
    let mut skills: Vec<String> = Vec::with_capacity(target);

    for _ in 0..target {
        let skill = *rng.pick(SKILLS);
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }

    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    #[test]
    fn test_generate_team_size_and_bounds() {
        let mut rng = SimRng::new(3);
        let team = generate_team(12, 1.0, &mut rng);

        assert_eq!(team.len(), 12);
        for member in &team {
            assert!(member.experience >= MIN_EXPERIENCE);
            assert!(member.availability >= 0.7 && member.availability < 0.9);
            assert!(!member.skills.is_empty());
        }
    }

    #[test]
    fn test_role_cycle() {
        let mut rng = SimRng::new(3);
        let team = generate_team(7, 3.0, &mut rng);
        let roles: Vec<Role> = team.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Developer,
                Role::Developer,
                Role::Developer,
                Role::ScrumMaster,
                Role::ProductOwner,
                Role::QAEngineer,
                Role::Developer,
            ]
        );
        assert_eq!(team[0].id, "member-0");
        assert_eq!(team[6].name, "Team Member 7");
    }

    #[test]
    fn test_empty_team() {
        let mut rng = SimRng::new(3);
        assert!(generate_team(0, 3.0, &mut rng).is_empty());
        // No draws were taken
        assert_eq!(rng, SimRng::new(3));
    }

    #[test]
    fn test_skills_are_unique_and_capped() {
        let mut rng = SimRng::new(11);
        for _ in 0..50 {
            let skills = generate_skills(10.0, &mut rng);
            assert!(skills.len() <= SKILLS.len());
            let mut deduped = skills.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), skills.len());
        }
    }

    #[test]
    fn test_skill_draw_count() {
        // experience 1.0 → target 4 draws, so exactly 4 values are consumed
        let mut rng = SimRng::new(5);
        let mut reference = SimRng::new(5);
        generate_skills(1.0, &mut rng);
        for _ in 0..4 {
            reference.next_f64();
        }
        assert_eq!(rng, reference);
    }
}
