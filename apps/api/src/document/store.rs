//! In-memory session store. Nothing is persisted: documents live for the
//! lifetime of the process and die with their session.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::resume::ResumeDocument;
use crate::models::session::SessionRow;

/// Shared handle to every live editing session, keyed by session id.
/// Mutations run under the writer lock and swap in a complete new document
/// value, so readers never observe a half-applied edit.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionRow>>>,
}

impl SessionStore {
    /// Creates a session holding a blank document.
    pub fn create(&self) -> SessionRow {
        let now = Utc::now();
        let row = SessionRow {
            id: Uuid::new_v4(),
            document: ResumeDocument::default(),
            created_at: now,
            updated_at: now,
        };
        self.sessions.write().insert(row.id, row.clone());
        row
    }

    pub fn get(&self, session_id: Uuid) -> Option<SessionRow> {
        self.sessions.read().get(&session_id).cloned()
    }

    /// Applies a pure mutation to the session's document and installs the
    /// result as the new canonical state. Returns the updated row plus
    /// whatever the mutation produced (e.g. a freshly assigned entry id),
    /// or `None` when the session does not exist.
    pub fn update<R>(
        &self,
        session_id: Uuid,
        mutate: impl FnOnce(&ResumeDocument) -> (ResumeDocument, R),
    ) -> Option<(SessionRow, R)> {
        let mut sessions = self.sessions.write();
        let row = sessions.get_mut(&session_id)?;
        let (next, out) = mutate(&row.document);
        row.document = next;
        row.updated_at = Utc::now();
        Some((row.clone(), out))
    }

    /// Ends a session and discards its document. Returns false when the
    /// session was already gone.
    pub fn remove(&self, session_id: Uuid) -> bool {
        self.sessions.write().remove(&session_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::mutations::PersonalField;

    #[test]
    fn test_create_then_get_returns_blank_document() {
        let store = SessionStore::default();
        let row = store.create();

        let fetched = store.get(row.id).expect("session should exist");
        assert_eq!(fetched.id, row.id);
        assert_eq!(fetched.document, ResumeDocument::default());
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[test]
    fn test_get_unknown_session_is_none() {
        let store = SessionStore::default();
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_update_installs_the_new_document() {
        let store = SessionStore::default();
        let row = store.create();

        let (updated, ()) = store
            .update(row.id, |doc| {
                (
                    doc.with_personal_field(PersonalField::FullName("Ada Lovelace".to_string())),
                    (),
                )
            })
            .expect("session should exist");

        assert_eq!(updated.document.personal_info.full_name, "Ada Lovelace");
        assert!(updated.updated_at >= updated.created_at);

        // The installed value is what subsequent reads observe.
        let fetched = store.get(row.id).expect("session should exist");
        assert_eq!(fetched.document, updated.document);
    }

    #[test]
    fn test_update_unknown_session_is_none() {
        let store = SessionStore::default();
        let result = store.update(Uuid::new_v4(), |doc| (doc.clone(), ()));
        assert!(result.is_none());
    }

    #[test]
    fn test_update_passes_the_mutation_output_through() {
        let store = SessionStore::default();
        let row = store.create();

        let (updated, entry_id) = store
            .update(row.id, |doc| doc.with_new_education())
            .expect("session should exist");
        assert_eq!(updated.document.education[0].id, entry_id);
    }

    #[test]
    fn test_remove_discards_the_session() {
        let store = SessionStore::default();
        let row = store.create();

        assert!(store.remove(row.id));
        assert!(store.get(row.id).is_none());
        assert!(!store.remove(row.id), "second removal reports absence");
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::default();
        let first = store.create();
        let second = store.create();

        store
            .update(first.id, |doc| (doc.with_summary("one".to_string()), ()))
            .expect("session should exist");

        let untouched = store.get(second.id).expect("session should exist");
        assert!(untouched.document.summary.is_empty());
    }
}
