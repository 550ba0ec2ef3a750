//! moderncv document renderer.
//!
//! `render` is a pure, total function of the resume record: equal documents
//! produce byte-identical output, and no input string can make it fail.
//! Section order is fixed (header, summary, education, experience, skills);
//! entry order inside each section is the document's insertion order.

use std::fmt::Write;

use crate::latex::escape::escape;
use crate::models::resume::{
    EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument, SkillCategory, SkillEntry,
};

/// Static document class and style declarations. Never derived from user
/// input.
const PREAMBLE: &str = "\\documentclass[11pt,a4paper,sans]{moderncv}\n\
\\moderncvstyle{classic}\n\
\\moderncvcolor{blue}\n\
\\usepackage[utf8]{inputenc}\n\
\\usepackage[scale=0.75]{geometry}\n";

/// Renders the complete LaTeX document. An all-empty record still yields a
/// compilable skeleton: preamble, name line, begin/end document, and no
/// sections at all.
pub fn render(doc: &ResumeDocument) -> String {
    let mut out = String::new();

    out.push_str(PREAMBLE);
    push_personal_info(&mut out, &doc.personal_info);
    out.push_str("\n\\begin{document}\n\\makecvtitle\n");

    push_summary(&mut out, &doc.summary);
    push_education(&mut out, &doc.education);
    push_experience(&mut out, &doc.experience);
    push_skills(&mut out, &doc.skills);

    out.push_str("\n\\end{document}\n");
    out
}

/// Header block. The name line is always emitted, even when blank — a
/// placeholder for an empty name is the client's concern, not the
/// renderer's. Contact lines appear only for non-empty fields, in fixed
/// order: email, phone, address, website, linkedin, github.
fn push_personal_info(out: &mut String, info: &PersonalInfo) {
    let _ = writeln!(out, "\\name{{{}}}{{}}", escape(&info.full_name));

    if !info.email.is_empty() {
        let _ = writeln!(out, "\\email{{{}}}", escape(&info.email));
    }
    if !info.phone.is_empty() {
        let _ = writeln!(out, "\\phone[mobile]{{{}}}", escape(&info.phone));
    }
    if !info.address.is_empty() {
        let _ = writeln!(out, "\\address{{{}}}{{}}{{}}", escape(&info.address));
    }
    if let Some(website) = nonblank(&info.website) {
        let _ = writeln!(out, "\\homepage{{{}}}", escape(website));
    }
    if let Some(linkedin) = nonblank(&info.linkedin) {
        let _ = writeln!(out, "\\social[linkedin]{{{}}}", escape(linkedin));
    }
    if let Some(github) = nonblank(&info.github) {
        let _ = writeln!(out, "\\social[github]{{{}}}", escape(github));
    }
}

fn push_summary(out: &mut String, summary: &str) {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        return;
    }
    out.push_str("\n\\section{Summary}\n");
    let _ = writeln!(out, "\\cvitem{{}}{{{}}}", escape(trimmed));
}

fn push_education(out: &mut String, entries: &[EducationEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str("\n\\section{Education}\n");
    for entry in entries {
        let dates = format!("{} - {}", escape(&entry.start_date), escape(&entry.end_date));
        let heading = format!(
            "{} in {}",
            escape(&entry.degree),
            escape(&entry.field_of_study)
        );
        let grade = match nonblank(&entry.gpa) {
            Some(gpa) => format!("GPA: {}", escape(gpa)),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "\\cventry{{{dates}}}{{{heading}}}{{{}}}{{}}{{{grade}}}{{{}}}",
            escape(&entry.institution),
            bullet_list(&entry.achievements),
        );
    }
}

fn push_experience(out: &mut String, entries: &[ExperienceEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str("\n\\section{Experience}\n");
    for entry in entries {
        // A current job has no end date, whatever the stored value says.
        let end = if entry.current {
            "Present".to_string()
        } else {
            escape(&entry.end_date)
        };
        let dates = format!("{} - {}", escape(&entry.start_date), end);
        let location = nonblank(&entry.location).map(escape).unwrap_or_default();
        let _ = writeln!(
            out,
            "\\cventry{{{dates}}}{{{}}}{{{}}}{{{location}}}{{}}{{{}}}",
            escape(&entry.position),
            escape(&entry.company),
            bullet_list(&entry.description),
        );
    }
}

fn push_skills(out: &mut String, entries: &[SkillEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str("\n\\section{Skills}\n");
    for category in SkillCategory::ALL {
        let names: Vec<String> = entries
            .iter()
            .filter(|skill| skill.category == category)
            .map(|skill| skill.name.trim())
            .filter(|name| !name.is_empty())
            .map(escape)
            .collect();
        if names.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "\\cvitem{{{}}}{{{}}}",
            category.label(),
            names.join(", ")
        );
    }
}

/// Renders non-blank lines as an itemize block. Returns an empty string
/// when nothing remains after filtering, leaving the enclosing `\cventry`
/// argument empty.
fn bullet_list(lines: &[String]) -> String {
    let items: Vec<String> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(escape)
        .collect();
    if items.is_empty() {
        return String::new();
    }

    let mut block = String::from("\\begin{itemize}");
    for item in &items {
        let _ = write!(block, "\n\\item {item}");
    }
    block.push_str("\n\\end{itemize}");
    block
}

fn nonblank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::mutations::{
        EducationField, ExperienceField, PersonalField, SkillField,
    };
    use uuid::Uuid;

    fn ada_document() -> ResumeDocument {
        let doc = ResumeDocument::default()
            .with_personal_field(PersonalField::FullName("Ada Lovelace".to_string()))
            .with_personal_field(PersonalField::Email("ada@example.com".to_string()));
        let (doc, id) = doc.with_new_education();
        doc.with_education_field(
            id,
            EducationField::Institution("Analytical Engine Institute".to_string()),
        )
        .with_education_field(id, EducationField::Degree("B.Sc".to_string()))
        .with_education_field(id, EducationField::FieldOfStudy("Mathematics".to_string()))
        .with_education_field(id, EducationField::StartDate("2020-09".to_string()))
        .with_education_field(id, EducationField::EndDate("2024-06".to_string()))
    }

    #[test]
    fn test_empty_document_is_a_bare_skeleton() {
        let out = render(&ResumeDocument::default());

        assert!(out.contains("\\documentclass[11pt,a4paper,sans]{moderncv}"));
        assert!(out.contains("\\name{}{}"));
        assert!(out.contains("\\begin{document}"));
        assert!(out.contains("\\makecvtitle"));
        assert!(out.contains("\\end{document}"));
        assert!(!out.contains("\\section{"), "no sections in an empty document");
        assert!(!out.contains("\\email"));
        assert!(!out.contains("\\phone"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = ada_document();
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn test_header_and_education_example() {
        let out = render(&ada_document());

        assert!(out.contains("\\name{Ada Lovelace}{}"));
        assert!(out.contains("\\email{ada@example.com}"));
        assert!(out.contains("\\section{Education}"));
        assert!(out.contains(
            "\\cventry{2020-09 - 2024-06}{B.Sc in Mathematics}{Analytical Engine Institute}{}{}{}"
        ));
        assert!(!out.contains("\\section{Experience}"));
        assert!(!out.contains("\\section{Skills}"));
        assert!(!out.contains("\\section{Summary}"));
    }

    #[test]
    fn test_contact_lines_follow_field_order() {
        let doc = ResumeDocument::default()
            .with_personal_field(PersonalField::Github("adal".to_string()))
            .with_personal_field(PersonalField::Phone("+44 20 7946 0857".to_string()))
            .with_personal_field(PersonalField::Email("ada@example.com".to_string()));
        let out = render(&doc);

        let email = out.find("\\email").expect("email line");
        let phone = out.find("\\phone[mobile]").expect("phone line");
        let github = out.find("\\social[github]").expect("github line");
        assert!(email < phone && phone < github);
        assert!(!out.contains("\\homepage"));
        assert!(!out.contains("\\social[linkedin]"));
    }

    #[test]
    fn test_gpa_renders_only_when_present() {
        let (doc, id) = ResumeDocument::default().with_new_education();
        let without = render(&doc);
        assert!(!without.contains("GPA:"));

        let doc = doc.with_education_field(id, EducationField::Gpa("3.9".to_string()));
        assert!(render(&doc).contains("{GPA: 3.9}"));
    }

    #[test]
    fn test_achievements_render_as_filtered_bullets() {
        let (doc, id) = ResumeDocument::default().with_new_education();
        let doc = doc.with_education_field(
            id,
            EducationField::Achievements(vec![
                "Dean's list".to_string(),
                "   ".to_string(),
                "Published thesis".to_string(),
            ]),
        );
        let out = render(&doc);

        assert!(out.contains("\\item Dean's list"));
        assert!(out.contains("\\item Published thesis"));
        assert_eq!(out.matches("\\item ").count(), 2, "blank line dropped");
    }

    #[test]
    fn test_current_experience_renders_present_and_ignores_end_date() {
        let (doc, id) = ResumeDocument::default().with_new_experience();
        let doc = doc
            .with_experience_field(id, ExperienceField::Position("Engineer".to_string()))
            .with_experience_field(id, ExperienceField::Company("Acme".to_string()))
            .with_experience_field(id, ExperienceField::StartDate("2021-01".to_string()))
            .with_experience_field(id, ExperienceField::EndDate("2023-12".to_string()))
            .with_experience_field(id, ExperienceField::Current(true));
        let out = render(&doc);

        assert!(out.contains("{2021-01 - Present}"));
        assert!(!out.contains("2023-12"), "stored end date is ignored");
    }

    #[test]
    fn test_experience_location_and_bullets() {
        let (doc, id) = ResumeDocument::default().with_new_experience();
        let doc = doc
            .with_experience_field(id, ExperienceField::Position("Engineer".to_string()))
            .with_experience_field(id, ExperienceField::Company("Acme".to_string()))
            .with_experience_field(id, ExperienceField::Location("Berlin".to_string()))
            .with_experience_field(
                id,
                ExperienceField::Description(vec![
                    "Shipped the parser".to_string(),
                    String::new(),
                    "Cut build times by 40%".to_string(),
                ]),
            );
        let out = render(&doc);

        assert!(out.contains("{Engineer}{Acme}{Berlin}"));
        assert!(out.contains("\\item Shipped the parser"));
        assert!(out.contains("\\item Cut build times by 40\\%"));
        assert_eq!(out.matches("\\item ").count(), 2, "empty bullet dropped");
    }

    #[test]
    fn test_skills_group_in_fixed_category_order() {
        let doc = ResumeDocument::default();
        let (doc, cpp) = doc.with_new_skill();
        let (doc, blank) = doc.with_new_skill();
        let (doc, french) = doc.with_new_skill();
        let doc = doc
            .with_skill_field(cpp, SkillField::Name("C++".to_string()))
            .with_skill_field(french, SkillField::Name("French".to_string()))
            .with_skill_field(french, SkillField::Category(SkillCategory::Language));
        let _ = blank; // stays blank-named on purpose
        let out = render(&doc);

        assert!(out.contains("\\cvitem{Technical Skills}{C++}"));
        assert!(out.contains("\\cvitem{Languages}{French}"));
        assert!(!out.contains("Soft Skills"), "empty category omitted");

        let technical = out.find("Technical Skills").expect("technical line");
        let languages = out.find("Languages").expect("language line");
        assert!(technical < languages);
    }

    #[test]
    fn test_skill_names_join_with_comma() {
        let doc = ResumeDocument::default();
        let (doc, a) = doc.with_new_skill();
        let (doc, b) = doc.with_new_skill();
        let doc = doc
            .with_skill_field(a, SkillField::Name("Rust".to_string()))
            .with_skill_field(b, SkillField::Name("Go".to_string()));
        assert!(render(&doc).contains("\\cvitem{Technical Skills}{Rust, Go}"));
    }

    #[test]
    fn test_summary_requires_nonblank_text() {
        let doc = ResumeDocument::default().with_summary("   \n  ".to_string());
        assert!(!render(&doc).contains("\\section{Summary}"));

        let doc = doc.with_summary("  Engineer with a parser habit.  ".to_string());
        let out = render(&doc);
        assert!(out.contains("\\section{Summary}"));
        assert!(out.contains("\\cvitem{}{Engineer with a parser habit.}"));
    }

    #[test]
    fn test_user_text_is_escaped_everywhere() {
        let doc = ResumeDocument::default()
            .with_personal_field(PersonalField::FullName("Ada & Co_100%".to_string()))
            .with_summary("Wrote \\evil{macros} for $5".to_string());
        let out = render(&doc);

        assert!(out.contains("\\name{Ada \\& Co\\_100\\%}{}"));
        assert!(out.contains("\\textbackslash{}evil\\{macros\\}"));
        assert!(out.contains("\\$5"));
        assert!(!out.contains("\\evil"), "raw command injection neutralized");
    }

    #[test]
    fn test_entries_render_in_insertion_order() {
        let doc = ResumeDocument::default();
        let (doc, first) = doc.with_new_education();
        let (doc, second) = doc.with_new_education();
        let doc = doc
            .with_education_field(first, EducationField::Institution("First U".to_string()))
            .with_education_field(second, EducationField::Institution("Second U".to_string()));
        let out = render(&doc);

        let a = out.find("First U").expect("first entry");
        let b = out.find("Second U").expect("second entry");
        assert!(a < b);
    }

    #[test]
    fn test_unknown_ids_never_change_the_rendering() {
        let doc = ada_document();
        let before = render(&doc);
        let after = render(
            &doc.with_education_field(
                Uuid::new_v4(),
                EducationField::Institution("Ghost".to_string()),
            ),
        );
        assert_eq!(before, after);
    }
}
