//! Plain-text section views.
//!
//! Every view is a pure function of the view model; none of them fetch or
//! mutate anything.

use crate::model::{Certification, PortfolioViewModel};

/// In-page anchors the navigation links to, in page order.
pub const NAV_ANCHORS: [&str; 5] = ["about", "experience", "projects", "skills", "contact"];

pub const EMAIL_COMPOSE: &str = "mailto:akshaj@example.com?subject=Collaboration Opportunity&body=Hi Akshaj, I would like to discuss...";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/akshajsm";
pub const GITHUB_URL: &str = "https://www.github.com/2smakshaj6";

const DEFAULT_BIO: &str = "I'm a cybersecurity professional passionate about building safer digital ecosystems through the strategic integration of AI and traditional security practices.";

fn heading(anchor: Option<&str>, title: &str) -> String {
    match anchor {
        Some(anchor) => format!("## {} {{#{}}}", title, anchor),
        None => format!("## {}", title),
    }
}

fn tags(items: &[String]) -> String {
    items.iter().map(|t| format!("[{}]", t)).collect::<Vec<_>>().join(" ")
}

pub fn hero(vm: &PortfolioViewModel) -> String {
    let info = &vm.personal_info;
    let mut lines = vec![format!(
        "# {}",
        info.name.as_deref().unwrap_or("Akshaj Shivara Madhusudhan")
    )];
    lines.push(info.title.as_deref().unwrap_or("Cybersecurity Professional").to_string());
    if !vm.stats.is_empty() {
        let stats: Vec<String> = vm.stats.iter().map(|s| format!("{} {}", s.value, s.label)).collect();
        lines.push(stats.join(" | "));
    }
    lines.join("\n")
}

pub fn about(vm: &PortfolioViewModel) -> String {
    let bio = vm
        .personal_info
        .bio
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(DEFAULT_BIO);
    format!("{}\n{}", heading(Some("about"), "About"), bio)
}

pub fn experience(vm: &PortfolioViewModel) -> String {
    let mut lines = vec![heading(Some("experience"), "Experience")];
    for exp in &vm.experience {
        lines.push(format!("### {} @ {}", exp.role, exp.company));
        lines.push(format!("{} | {}", exp.location, exp.period));
        lines.extend(exp.highlights.iter().map(|h| format!("- {}", h)));
        if !exp.skills.is_empty() {
            lines.push(tags(&exp.skills));
        }
    }
    lines.join("\n")
}

pub fn projects(vm: &PortfolioViewModel) -> String {
    let mut lines = vec![heading(Some("projects"), "Projects")];
    for project in &vm.projects {
        lines.push(format!("### {} ({})", project.title, project.status));
        lines.push(project.description.clone());
        if !project.tech.is_empty() {
            lines.push(tags(&project.tech));
        }
        let mut links = Vec::new();
        if project.github {
            links.push("source");
        }
        if project.demo {
            links.push("demo");
        }
        if !links.is_empty() {
            lines.push(format!("links: {}", links.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn skills(vm: &PortfolioViewModel) -> String {
    let mut lines = vec![heading(Some("skills"), "Skills")];
    for cat in &vm.skills {
        lines.push(format!("### {}", cat.category));
        lines.push(cat.skills.join(", "));
    }
    lines.join("\n")
}

pub fn education(vm: &PortfolioViewModel) -> String {
    let mut lines = vec![heading(None, "Education")];
    for edu in &vm.education {
        lines.push(format!("### {}", edu.degree));
        lines.push(format!("{}, {} | {}", edu.school, edu.location, edu.period));
        if !edu.gpa.is_empty() {
            lines.push(format!("GPA: {}", edu.gpa));
        }
        if !edu.coursework.is_empty() {
            lines.push(format!("Coursework: {}", edu.coursework.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn certifications(vm: &PortfolioViewModel) -> String {
    let mut lines = vec![heading(None, "Certifications")];
    lines.extend(vm.certifications.iter().map(|cert| match cert {
        Certification::Bare(name) => format!("- {}", name),
        Certification::Named { name, issuer, .. } => match issuer {
            Some(issuer) => format!("- {} ({})", name, issuer),
            None => format!("- {}", name),
        },
    }));
    lines.join("\n")
}

pub fn contact(_vm: &PortfolioViewModel) -> String {
    [
        heading(Some("contact"), "Contact"),
        format!("Email: {}", EMAIL_COMPOSE),
        format!("LinkedIn: {}", LINKEDIN_URL),
        format!("GitHub: {}", GITHUB_URL),
    ]
    .join("\n")
}

pub fn render_page(vm: &PortfolioViewModel) -> String {
    [
        hero(vm),
        about(vm),
        experience(vm),
        projects(vm),
        skills(vm),
        education(vm),
        certifications(vm),
        contact(vm),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_dataset;
    use crate::model::PersonalInfo;

    #[test]
    fn test_page_has_every_anchor_in_order() {
        let page = render_page(&default_dataset());
        let positions: Vec<usize> = NAV_ANCHORS
            .iter()
            .map(|a| page.find(&format!("{{#{}}}", a)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_empty_sections_still_render() {
        let page = render_page(&PortfolioViewModel::default());
        assert!(page.contains("## Projects {#projects}"));
        assert!(page.contains(DEFAULT_BIO));
    }

    #[test]
    fn test_bio_override() {
        let vm = PortfolioViewModel {
            personal_info: PersonalInfo {
                bio: Some("Builds detection pipelines.".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(about(&vm).ends_with("Builds detection pipelines."));
    }

    #[test]
    fn test_project_links() {
        let out = projects(&default_dataset());
        assert!(out.contains("### Detection Engine (Published • GitHub & PyPI)"));
        assert!(out.contains("links: source, demo"));
    }

    #[test]
    fn test_hero_stats_line() {
        assert!(hero(&default_dataset()).contains("3+ Years Experience | 15+ Security Projects"));
    }
}
