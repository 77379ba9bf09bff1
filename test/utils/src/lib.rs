pub fn resume_fixture() -> &'static str {
    return r#"{"score":7,"atsCompatibility":82,"strengths":["Python"],"weaknesses":[],"keywordSuggestions":["Kubernetes"],"improvementRecommendations":["Add metrics"],"suggestedSkills":["Go"],"summary":"Solid."}"#;
}

pub fn resume_text_fixture() -> &'static str {
    return "Senior engineer, 5 years, Python";
}

pub fn code_fixture() -> &'static str {
    return r#"
def average(numbers):
    total = 0
    for n in numbers:
        total += n
    return total / len(numbers)
"#
    .trim();
}
