//! crates/seo_writer_core/src/session.rs
//!
//! The generation session state machine:
//! `idle -> validating -> generating -> {succeeded | failed}`.
//!
//! The machine never suspends. The caller runs the slow generation step
//! elsewhere and reports back with the `AttemptId` it was given, so results
//! from a superseded attempt are recognised and dropped.

use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    AttemptId, GenerationRequest, GenerationSession, SeoAssessment, SessionPhase,
    SynthesizedDocument,
};
use crate::error::{CoreError, CoreResult};
use crate::seo;

/// Whether a reported result was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Discarded,
}

/// The pieces of a succeeded session needed to commit an article.
#[derive(Debug, Clone, Copy)]
pub struct CommitSource<'a> {
    pub request: &'a GenerationRequest,
    pub document: &'a SynthesizedDocument,
    pub assessment: &'a SeoAssessment,
}

#[derive(Debug, Default)]
pub struct SessionMachine {
    session: GenerationSession,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    /// Starts a new attempt, discarding any previous terminal state.
    ///
    /// Rejected with `SessionBusy` while an attempt is generating; the
    /// in-flight attempt is left alone. A topic that is empty after trimming
    /// is a `Validation` error and the session is left exactly as it was.
    pub fn submit(&mut self, mut request: GenerationRequest) -> CoreResult<AttemptId> {
        if self.session.phase == SessionPhase::Generating {
            return Err(CoreError::SessionBusy);
        }

        let previous = std::mem::replace(&mut self.session.phase, SessionPhase::Validating);
        request.topic = request.topic.trim().to_string();
        if request.topic.is_empty() {
            self.session.phase = previous;
            return Err(CoreError::Validation(
                "Please enter a topic for your article".to_string(),
            ));
        }

        let attempt = self.session.attempt.next();
        self.session = GenerationSession {
            attempt,
            request: Some(request),
            phase: SessionPhase::Generating,
            ..GenerationSession::default()
        };
        Ok(attempt)
    }

    /// Records a finished document for `attempt` and evaluates it.
    pub fn complete(&mut self, attempt: AttemptId, document: SynthesizedDocument) -> Transition {
        if !self.is_in_flight(attempt) {
            debug!(%attempt, current = %self.session.attempt, "discarding stale completion");
            return Transition::Discarded;
        }
        let Some(request) = self.session.request.as_ref() else {
            return Transition::Discarded;
        };

        let assessment = seo::evaluate(Some(&document), request);
        self.session.document = Some(document);
        self.session.assessment = Some(assessment);
        self.session.phase = SessionPhase::Succeeded;
        Transition::Applied
    }

    /// Records a provider failure for `attempt`. No document is kept.
    pub fn fail(&mut self, attempt: AttemptId, reason: impl Into<String>) -> Transition {
        if !self.is_in_flight(attempt) {
            debug!(%attempt, current = %self.session.attempt, "discarding stale failure");
            return Transition::Discarded;
        }
        self.session.document = None;
        self.session.assessment = None;
        self.session.error_reason = Some(reason.into());
        self.session.phase = SessionPhase::Failed;
        Transition::Applied
    }

    /// Replaces the succeeded document with an edited one and re-evaluates it.
    pub fn revise(&mut self, document: SynthesizedDocument) -> CoreResult<&SeoAssessment> {
        self.ensure_uncommitted_success("revise")?;
        let Some(request) = self.session.request.as_ref() else {
            return Err(CoreError::Internal("succeeded session without a request".into()));
        };

        let assessment = seo::evaluate(Some(&document), request);
        self.session.document = Some(document);
        let assessment = self.session.assessment.insert(assessment);
        Ok(&*assessment)
    }

    /// What a commit needs, available only once per succeeded attempt.
    pub fn commit_source(&self) -> CoreResult<CommitSource<'_>> {
        self.ensure_uncommitted_success("commit")?;
        match (
            self.session.request.as_ref(),
            self.session.document.as_ref(),
            self.session.assessment.as_ref(),
        ) {
            (Some(request), Some(document), Some(assessment)) => Ok(CommitSource {
                request,
                document,
                assessment,
            }),
            _ => Err(CoreError::Internal("succeeded session is missing its output".into())),
        }
    }

    pub fn mark_committed(&mut self, article_id: Uuid) {
        self.session.committed_article_id = Some(article_id);
    }

    fn is_in_flight(&self, attempt: AttemptId) -> bool {
        self.session.phase == SessionPhase::Generating && self.session.attempt == attempt
    }

    fn ensure_uncommitted_success(&self, action: &str) -> CoreResult<()> {
        match self.session.phase {
            SessionPhase::Succeeded => match self.session.committed_article_id {
                Some(id) => Err(CoreError::Validation(format!(
                    "cannot {action}: article already committed as {id}"
                ))),
                None => Ok(()),
            },
            SessionPhase::Failed => Err(CoreError::Generation(
                self.session
                    .error_reason
                    .clone()
                    .unwrap_or_else(|| "generation failed".to_string()),
            )),
            SessionPhase::Generating | SessionPhase::Validating => Err(CoreError::SessionBusy),
            SessionPhase::Idle => Err(CoreError::Validation(format!(
                "cannot {action}: no article has been generated"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, RubricStatus, TargetWordCount, Tone};
    use crate::synthesizer::{parse_markdown, synthesize};

    fn request(topic: &str) -> GenerationRequest {
        GenerationRequest::new(
            topic,
            "productivity",
            Tone::Professional,
            TargetWordCount::Words1000,
            Language::English,
        )
    }

    #[test]
    fn whitespace_topic_is_rejected_and_session_stays_idle() {
        let mut machine = SessionMachine::new();
        let err = machine.submit(request("   ")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(machine.phase(), SessionPhase::Idle);
        assert!(machine.session().request.is_none());
        assert!(machine.session().document.is_none());
    }

    #[test]
    fn submit_then_complete_succeeds_with_assessment() {
        let mut machine = SessionMachine::new();
        let req = request("Remote Work");
        let attempt = machine.submit(req.clone()).unwrap();
        assert_eq!(machine.phase(), SessionPhase::Generating);

        assert_eq!(machine.complete(attempt, synthesize(&req)), Transition::Applied);
        let session = machine.session();
        assert_eq!(session.phase, SessionPhase::Succeeded);
        let assessment = session.assessment.as_ref().unwrap();
        assert!(assessment.checklist.iter().all(|i| i.status != RubricStatus::Pending));
    }

    #[test]
    fn submit_while_generating_is_rejected() {
        let mut machine = SessionMachine::new();
        let first = machine.submit(request("Remote Work")).unwrap();
        assert_eq!(machine.submit(request("Other")), Err(CoreError::SessionBusy));
        assert_eq!(machine.session().attempt, first);
        assert_eq!(machine.session().request.as_ref().unwrap().topic, "Remote Work");
    }

    #[test]
    fn failure_keeps_no_document() {
        let mut machine = SessionMachine::new();
        let attempt = machine.submit(request("Remote Work")).unwrap();
        assert_eq!(machine.fail(attempt, "provider down"), Transition::Applied);
        assert_eq!(machine.phase(), SessionPhase::Failed);
        assert_eq!(machine.session().error_reason.as_deref(), Some("provider down"));
        assert!(machine.session().document.is_none());
        assert!(matches!(machine.commit_source(), Err(CoreError::Generation(_))));
    }

    #[test]
    fn new_submit_replaces_terminal_state_and_stale_results_are_discarded() {
        let mut machine = SessionMachine::new();
        let first = machine.submit(request("Remote Work")).unwrap();
        machine.fail(first, "timeout");

        let second = machine.submit(request("Digital Marketing")).unwrap();
        assert!(second > first);
        assert!(machine.session().error_reason.is_none());

        let late = synthesize(&request("Remote Work"));
        assert_eq!(machine.complete(first, late), Transition::Discarded);
        assert_eq!(machine.fail(first, "late"), Transition::Discarded);
        assert_eq!(machine.phase(), SessionPhase::Generating);
    }

    #[test]
    fn invalid_resubmit_leaves_terminal_state_untouched() {
        let mut machine = SessionMachine::new();
        let req = request("Remote Work");
        let attempt = machine.submit(req.clone()).unwrap();
        machine.complete(attempt, synthesize(&req));
        let before = machine.session().clone();

        assert!(machine.submit(request("")).is_err());
        assert_eq!(machine.session(), &before);
    }

    #[test]
    fn revise_re_evaluates_and_commit_is_single_use() {
        let mut machine = SessionMachine::new();
        let req = request("Remote Work");
        let attempt = machine.submit(req.clone()).unwrap();
        machine.complete(attempt, synthesize(&req));

        let edited = parse_markdown("# Remote Work\n\n### Orphan\n\nShort text.");
        let assessment = machine.revise(edited).unwrap();
        assert!(assessment.score < 70);

        assert!(machine.commit_source().is_ok());
        machine.mark_committed(Uuid::new_v4());
        assert!(matches!(machine.commit_source(), Err(CoreError::Validation(_))));
        assert!(machine.revise(synthesize(&req)).is_err());
    }

    #[test]
    fn commit_before_generation_is_rejected() {
        let machine = SessionMachine::new();
        assert!(matches!(machine.commit_source(), Err(CoreError::Validation(_))));
    }
}
