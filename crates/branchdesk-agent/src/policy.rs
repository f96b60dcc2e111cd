//! The response policy.
//!
//! Per query: rank the guideline records lexically, then pick one of three
//! outcomes from the top score.
//!
//! ```text
//! User question
//!   ↓ rank (top-K)
//! top score < LOW    → refusal message, no model call
//! top score ≥ HIGH   → stored answer verbatim + citation, no model call
//! LOW ≤ score < HIGH → generation call grounded on the top-K records
//! ```
//!
//! The HIGH band exists to skip the model entirely when the lexical match
//! is already unambiguous; the LOW band guarantees the assistant never
//! invents an answer the sheet does not back. Every failure on the
//! escalation path is converted to a user-readable message here —
//! [`answer`] always returns text.

use std::time::Duration;

use branchdesk_core::config::BranchdeskConfig;
use branchdesk_core::error::BranchdeskError;
use branchdesk_core::traits::Generator;
use branchdesk_core::types::{KnowledgeRecord, ScoredCandidate};

use crate::prompt;

/// Refusal wording for questions the sheet does not cover. Also embedded in
/// the escalation prompt so the model degrades to the same phrasing.
pub const REFUSAL_LINE: &str =
    "현재 등록되지 않은 지침입니다. 정확한 확인을 위해 지점 매니저님께 문의 부탁드립니다.";

const EMPTY_GENERATION_MESSAGE: &str =
    "AI가 답변을 생성하지 못했습니다. 잠시 후 다시 시도해 주세요.";

fn refusal(user_name: &str) -> String {
    format!("{user_name}님, {REFUSAL_LINE}")
}

fn quota_degraded(user_name: &str) -> String {
    format!(
        "{user_name}님, 현재 AI 요청량이 많아 생성 답변이 잠시 제한되었습니다. \
         등록된 지침 조회는 계속 이용하실 수 있으니 잠시 후 다시 시도해 주세요."
    )
}

fn service_fault(detail: &str) -> String {
    format!("⚠️ 서비스 일시 오류 (관리자 문의): {detail}")
}

fn direct_answer(user_name: &str, top: &ScoredCandidate) -> String {
    let bullets = top
        .answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("• {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{user_name}님, 등록된 지침에서 확인된 내용입니다.\n\n{bullets}\n\n(출처: 지침 시트 {}행)",
        top.display_row()
    )
}

/// Answer one question from the guideline records.
///
/// Total: converts every fault into displayable text and never propagates
/// an error. Holds no state between calls.
pub async fn answer(
    query: &str,
    records: &[KnowledgeRecord],
    user_name: &str,
    generator: &dyn Generator,
    config: &BranchdeskConfig,
) -> String {
    // Nothing usable in the sheet — refuse without ranking or generating.
    if !records.iter().any(KnowledgeRecord::is_eligible) {
        tracing::debug!("No eligible guideline records — refusing");
        return refusal(user_name);
    }

    let retrieval = &config.retrieval;
    let ranked = branchdesk_match::rank(query, records, retrieval.top_k);
    let top_score = ranked.first().map(|c| c.score).unwrap_or(0);

    if top_score < retrieval.low_threshold {
        tracing::debug!(top_score, "Below low threshold — refusing");
        return refusal(user_name);
    }

    if top_score >= retrieval.high_threshold {
        let top = &ranked[0];
        tracing::debug!(
            top_score,
            row = top.display_row(),
            "Strong match — answering from stored record"
        );
        return direct_answer(user_name, top);
    }

    tracing::debug!(
        top_score,
        candidates = ranked.len(),
        provider = generator.name(),
        "Partial match — escalating to generation"
    );
    let generation_prompt = prompt::build(query, &ranked, user_name, &config.identity);
    let timeout = Duration::from_secs(config.llm.request_timeout_secs);

    match tokio::time::timeout(timeout, generator.generate(&generation_prompt)).await {
        Err(_) => {
            let err = BranchdeskError::Timeout(config.llm.request_timeout_secs);
            tracing::warn!("⚠️ Generation timed out: {err}");
            service_fault(&err.to_string())
        }
        Ok(Err(e)) if e.is_rate_limit() => {
            tracing::warn!("⚠️ Generation rate-limited: {e}");
            quota_degraded(user_name)
        }
        Ok(Err(e)) => {
            tracing::warn!("⚠️ Generation failed: {e}");
            service_fault(&e.to_string())
        }
        Ok(Ok(text)) if text.trim().is_empty() => EMPTY_GENERATION_MESSAGE.to_string(),
        Ok(Ok(text)) => text,
    }
}
