// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt suffix that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a role description with the JSON-only rule.
pub fn json_system(role: &str) -> String {
    format!("{role}\n\n{JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_appends_rule() {
        let system = json_system("あなたは経験豊富なPR専門家です。");
        assert!(system.starts_with("あなたは経験豊富なPR専門家です。"));
        assert!(system.ends_with(JSON_ONLY_SYSTEM));
    }
}
