//! Escalation prompt assembly.

use branchdesk_core::config::IdentityConfig;
use branchdesk_core::types::ScoredCandidate;

use crate::policy::REFUSAL_LINE;

/// Render ranked candidates into the grounding block handed to the model.
///
/// Entries stay in ranking order; each one carries its sheet row and score
/// so the model can cite and so operators can replay a decision from logs.
pub fn grounding_context(ranked: &[ScoredCandidate]) -> String {
    ranked
        .iter()
        .map(|c| {
            format!(
                "[source #{} / score={}]\nQ: {}\nA: {}",
                c.display_row(),
                c.score,
                c.question,
                c.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the full generation prompt for a partially matched question.
pub(crate) fn build(
    query: &str,
    ranked: &[ScoredCandidate],
    user_name: &str,
    identity: &IdentityConfig,
) -> String {
    let context = grounding_context(ranked);
    format!(
        "{persona}\n\n\
         [답변 원칙]\n\
         1. 답변의 첫 문장은 반드시 \"{user_name}님\"으로 시작하세요.\n\
         2. 아래 [지침 데이터]에 있는 내용만 근거로 답변하세요.\n\
         3. [지침 데이터]에서 답을 찾을 수 없으면 정확히 \"{refusal}\"라고만 안내하세요.\n\
         4. 답변은 스마트폰에서 보기 편하게 짧은 문장과 불렛 포인트(•)를 사용하세요.\n\n\
         [지침 데이터]:\n{context}\n\n\
         질문: {query}",
        persona = identity.persona,
        refusal = REFUSAL_LINE,
    )
}
