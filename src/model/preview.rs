//! Preview lifecycle: Closed -> Open -> Sending -> Closed / Open

use super::tab::{PreviewDocument, SubmissionRequest};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PreviewPhase {
    #[default]
    Closed,
    Open(PreviewDocument),
    Sending(PreviewDocument),
}

/// Result of settling a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Sent; the document was discarded
    Closed,
    /// Failed; the document is open again with its edits
    Reopened,
    /// The preview was closed or replaced while the send was in flight
    Detached,
}

/// Result of handing a fetched document to the preview
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// A newer acquisition or a close invalidated this one
    Superseded,
    /// Still current, but another document is being sent
    Busy,
}

/// Owns the single preview slot.
///
/// Acquisitions take a generation number from [`begin_acquisition`](Self::begin_acquisition);
/// only the newest generation may open the preview, and closing the preview invalidates
/// whatever is still in flight.
#[derive(Clone, Debug, Default)]
pub struct PreviewState {
    phase: PreviewPhase,
    session: u64,
    acquisition_gen: u64,
    acquiring: bool,
}

impl PreviewState {
    pub fn phase(&self) -> &PreviewPhase {
        &self.phase
    }

    pub fn document(&self) -> Option<&PreviewDocument> {
        match &self.phase {
            PreviewPhase::Closed => None,
            PreviewPhase::Open(doc) | PreviewPhase::Sending(doc) => Some(doc),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, PreviewPhase::Closed)
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, PreviewPhase::Sending(_))
    }

    /// An acquisition that may still open the preview is in flight
    pub fn is_acquiring(&self) -> bool {
        self.acquiring
    }

    /// Start an acquisition, superseding any earlier one
    pub fn begin_acquisition(&mut self) -> u64 {
        self.acquisition_gen += 1;
        self.acquiring = true;
        self.acquisition_gen
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.acquisition_gen
    }

    /// Settle a failed acquisition. Returns false if it was superseded.
    pub fn fail_acquisition(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.acquiring = false;
        true
    }

    /// Open the preview with `doc` if `generation` is still current and no send is running
    pub fn open_if_current(&mut self, generation: u64, doc: PreviewDocument) -> OpenOutcome {
        if !self.is_current(generation) {
            return OpenOutcome::Superseded;
        }
        self.acquiring = false;
        if self.is_sending() {
            return OpenOutcome::Busy;
        }
        self.session += 1;
        self.phase = PreviewPhase::Open(doc);
        OpenOutcome::Opened
    }

    /// Apply an edit to the content. Only possible while Open.
    pub fn edit_content(&mut self, edit: impl FnOnce(&mut String)) -> bool {
        match &mut self.phase {
            PreviewPhase::Open(doc) => {
                edit(&mut doc.content);
                true
            }
            _ => false,
        }
    }

    /// Open -> Sending. Returns the session and the request to send.
    pub fn begin_send(&mut self, requires_automation: Option<bool>) -> Option<(u64, SubmissionRequest)> {
        let doc = match std::mem::take(&mut self.phase) {
            PreviewPhase::Open(doc) => doc,
            other => {
                self.phase = other;
                return None;
            }
        };
        let request = SubmissionRequest::from_document(&doc, requires_automation);
        self.phase = PreviewPhase::Sending(doc);
        Some((self.session, request))
    }

    /// Settle the send started for `session`
    pub fn finish_send(&mut self, session: u64, success: bool) -> SendOutcome {
        match std::mem::take(&mut self.phase) {
            PreviewPhase::Sending(_) if session == self.session && success => SendOutcome::Closed,
            PreviewPhase::Sending(doc) if session == self.session => {
                self.phase = PreviewPhase::Open(doc);
                SendOutcome::Reopened
            }
            other => {
                self.phase = other;
                SendOutcome::Detached
            }
        }
    }

    /// Discard the document and cancel any acquisition still in flight
    pub fn close(&mut self) -> bool {
        self.acquisition_gen += 1;
        self.acquiring = false;
        let was_visible = self.is_visible();
        if was_visible {
            self.session += 1;
        }
        self.phase = PreviewPhase::Closed;
        was_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> PreviewDocument {
        PreviewDocument {
            song: "Oceans".into(),
            artist: "Hillsong United".into(),
            id: "1234".into(),
            content: content.into(),
            is_manual: false,
            header_defaulted: false,
        }
    }

    fn open(state: &mut PreviewState, content: &str) {
        let generation = state.begin_acquisition();
        assert_eq!(state.open_if_current(generation, doc(content)), OpenOutcome::Opened);
    }

    #[test]
    fn failed_send_keeps_edits_and_reopens() {
        let mut state = PreviewState::default();
        open(&mut state, "G C");
        state.edit_content(|c| c.push_str(" D"));

        let (session, request) = state.begin_send(None).unwrap();
        assert_eq!(request.content, "G C D");
        assert!(state.is_sending());
        assert!(!state.edit_content(|c| c.push('x')));

        assert_eq!(state.finish_send(session, false), SendOutcome::Reopened);
        assert_eq!(state.phase(), &PreviewPhase::Open(doc("G C D")));
    }

    #[test]
    fn successful_send_closes_and_discards() {
        let mut state = PreviewState::default();
        open(&mut state, "G");
        let (session, _) = state.begin_send(Some(true)).unwrap();
        assert_eq!(state.finish_send(session, true), SendOutcome::Closed);
        assert!(state.document().is_none());
    }

    #[test]
    fn send_requires_open_preview() {
        let mut state = PreviewState::default();
        assert!(state.begin_send(None).is_none());

        open(&mut state, "G");
        assert!(state.begin_send(None).is_some());
        assert!(state.begin_send(None).is_none(), "second send while sending");
    }

    #[test]
    fn closing_during_send_detaches_outcome() {
        let mut state = PreviewState::default();
        open(&mut state, "G");
        let (session, _) = state.begin_send(None).unwrap();
        assert!(state.close());
        assert_eq!(state.finish_send(session, false), SendOutcome::Detached);
        assert_eq!(state.phase(), &PreviewPhase::Closed);
    }

    #[test]
    fn newer_acquisition_supersedes_older() {
        let mut state = PreviewState::default();
        let first = state.begin_acquisition();
        let second = state.begin_acquisition();

        assert_eq!(state.open_if_current(first, doc("old")), OpenOutcome::Superseded);
        assert!(!state.fail_acquisition(first));
        assert!(state.is_acquiring());
        assert_eq!(state.open_if_current(second, doc("new")), OpenOutcome::Opened);
        assert_eq!(state.document().map(|d| d.content.as_str()), Some("new"));
        assert!(!state.is_acquiring());
    }

    #[test]
    fn late_response_after_close_is_discarded() {
        let mut state = PreviewState::default();
        let generation = state.begin_acquisition();
        assert!(!state.close());
        assert_eq!(state.open_if_current(generation, doc("late")), OpenOutcome::Superseded);
        assert!(!state.is_visible());
    }

    #[test]
    fn acquisition_cannot_replace_document_being_sent() {
        let mut state = PreviewState::default();
        open(&mut state, "sending");
        let (session, _) = state.begin_send(None).unwrap();

        let generation = state.begin_acquisition();
        assert_eq!(state.open_if_current(generation, doc("other")), OpenOutcome::Busy);
        assert!(!state.is_acquiring());
        assert_eq!(state.finish_send(session, true), SendOutcome::Closed);
    }
}
