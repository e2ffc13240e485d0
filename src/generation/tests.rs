use super::*;

#[test]
fn test_prompt_contains_all_inputs() {
    let prompt = build_prompt(
        "APT used PowerShell scripts",
        "adversary launched powershell.exe",
        "T1059",
    );

    assert!(prompt.contains("APT used PowerShell scripts"));
    assert!(prompt.contains("adversary launched powershell.exe"));
    assert!(prompt.contains("T1059"));
}

#[test]
fn test_prompt_is_deterministic() {
    let a = build_prompt("q", "e", "T1059");
    let b = build_prompt("q", "e", "T1059");
    assert_eq!(a, b);
}

#[test]
fn test_prompt_with_empty_evidence() {
    let prompt = build_prompt("query text", "", "T1059");
    assert!(prompt.contains("Evidence: \n"));
}

#[tokio::test]
async fn test_stub_generator_is_deterministic() {
    let generator = ExplanationGenerator::stub().unwrap();
    let prompt = build_prompt("q", "e", "T1059");

    let a = generator.generate(&prompt).await.unwrap();
    let b = generator.generate(&prompt).await.unwrap();

    assert_eq!(a, b);
    assert!(a.contains("T1059"));
}

#[test]
fn test_config_rejects_empty_model_in_non_stub_mode() {
    let config = GenerationConfig {
        model: " ".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(GenerationError::InvalidConfig { .. })
    ));
}

#[test]
fn test_config_rejects_zero_max_tokens() {
    let config = GenerationConfig::stub().with_max_tokens(0);

    assert!(matches!(
        config.validate(),
        Err(GenerationError::InvalidConfig { .. })
    ));
}

#[test]
fn test_stub_flag() {
    assert!(ExplanationGenerator::stub().unwrap().is_stub());
}
