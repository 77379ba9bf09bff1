use super::*;

#[test]
fn it_builds_resume_prompt_without_role() {
    let prompt = resume_prompt("Senior engineer", "  ");

    insta::assert_snapshot!(prompt, @r###"
    Evaluate the following resume. Give a detailed evaluation.

    Resume:
    Senior engineer
    "###);
}

#[test]
fn it_builds_resume_prompt_with_role() {
    let prompt = resume_prompt("Senior engineer", "Backend Engineer");

    insta::assert_snapshot!(prompt, @r###"
    Evaluate the following resume for the target role of Backend Engineer. Give a detailed evaluation.

    Resume:
    Senior engineer
    "###);
}

#[test]
fn it_builds_code_prompt() {
    let prompt = code_prompt("fn main() {}", Language::Rust);

    insta::assert_snapshot!(prompt, @r###"
    Code (rust):

    ```rust
    fn main() {}
    ```
    "###);
}

#[test]
fn it_builds_distinct_instructions_per_category() {
    let bugs = code_system_instruction(CodeAnalysisCategory::Bugs);
    let tests = code_system_instruction(CodeAnalysisCategory::Tests);

    assert_ne!(bugs, tests);
    insta::assert_snapshot!(bugs, @"You are an experienced software engineer and mentor. Point out likely bugs, security vulnerabilities, and logic errors. Format the response as Markdown.");
}

#[test]
fn it_embeds_code_in_tutor_instruction() {
    let instruction = tutor_system_instruction("print(1)", Language::Python);

    insta::assert_snapshot!(instruction, @r###"
    You are a patient programming tutor helping a student with their python code:

    ```python
    print(1)
    ```

    Focus on explaining the logic and suggesting improvements.
    "###);
}
