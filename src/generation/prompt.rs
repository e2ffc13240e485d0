//! Deterministic explanation prompt construction.

/// Builds the explanation prompt from the query, best evidence, and the
/// inferred technique id.
///
/// The prompt is a pure function of its inputs: same query, evidence, and
/// id always produce the same string. An absent best passage renders as an
/// empty evidence line, never a placeholder the model could mistake for
/// content.
pub fn build_prompt(query: &str, best_passage: &str, technique_id: &str) -> String {
    format!(
        "Given the input: {query}\n\
         Evidence: {best_passage}\n\
         Provide a concise explanation and map to MITRE ATT&CK technique id {technique_id}."
    )
}
