use anyhow::Result;

use super::build;
use super::intent_from_matches;
use super::Intent;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::Language;
use crate::domain::models::ResumeSection;

fn intent(args: Vec<&str>) -> Result<Option<Intent>> {
    let matches = build().try_get_matches_from(args)?;
    let (name, subcmd_matches) = matches.subcommand().unwrap();
    return Ok(intent_from_matches(name, subcmd_matches));
}

#[test]
fn it_parses_resume() -> Result<()> {
    let res = intent(vec!["coachlm", "resume", "-r", "Backend Engineer"])?;
    assert_eq!(
        res,
        Some(Intent::Resume {
            file: None,
            target_role: "Backend Engineer".to_string(),
            copy: None,
        })
    );
    return Ok(());
}

#[test]
fn it_parses_resume_copy_section() -> Result<()> {
    let res = intent(vec!["coachlm", "resume", "-f", "cv.txt", "--copy", "skills"])?;
    assert_eq!(
        res,
        Some(Intent::Resume {
            file: Some("cv.txt".to_string()),
            target_role: "".to_string(),
            copy: Some(ResumeSection::Skills),
        })
    );

    let res = build().try_get_matches_from(vec!["coachlm", "resume", "--copy", "summary"]);
    assert!(res.is_err());
    return Ok(());
}

#[test]
fn it_parses_code_with_default_category() -> Result<()> {
    let res = intent(vec!["coachlm", "code", "-f", "main.rs"])?;
    assert_eq!(
        res,
        Some(Intent::Code {
            file: "main.rs".to_string(),
            language: None,
            categories: vec![CodeAnalysisCategory::Explanation],
        })
    );
    return Ok(());
}

#[test]
fn it_parses_code_with_categories() -> Result<()> {
    let res = intent(vec![
        "coachlm", "code", "-f", "main.py", "-l", "python", "-k", "bugs", "-k", "tests",
    ])?;
    assert_eq!(
        res,
        Some(Intent::Code {
            file: "main.py".to_string(),
            language: Some(Language::Python),
            categories: vec![CodeAnalysisCategory::Bugs, CodeAnalysisCategory::Tests],
        })
    );
    return Ok(());
}

#[test]
fn it_rejects_unknown_categories() {
    let res = build().try_get_matches_from(vec!["coachlm", "code", "-f", "a.rs", "-k", "style"]);
    assert!(res.is_err());
}

#[test]
fn it_requires_a_file_for_tutor() {
    let res = build().try_get_matches_from(vec!["coachlm", "tutor"]);
    assert!(res.is_err());
}

#[test]
fn it_parses_models() -> Result<()> {
    let res = intent(vec!["coachlm", "--gemini-token", "abc", "models"])?;
    assert_eq!(res, Some(Intent::Models));
    return Ok(());
}
