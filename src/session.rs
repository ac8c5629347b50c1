use std::sync::Arc;

use tagwire_util::result_ext::ResultExt as _;
use tracing::{debug, warn};

use crate::{error::TagError, tag::Tag, technology::Technology};

type Result<T, E = TagError> = std::result::Result<T, E>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum SessionState {
    Closed,
    Open,
    Disposed,
}

/// One technology handle bound to one tag, opened lazily and disposed exactly once
#[derive(Debug)]
pub struct TechnologySession<T: ?Sized + Technology> {
    tag: Option<Tag>,
    technology: Arc<T>,
    state: SessionState,
}

impl<T: ?Sized + Technology> TechnologySession<T> {
    pub fn new(tag: Tag, technology: Arc<T>) -> Self {
        Self {
            tag: Some(tag),
            technology,
            state: SessionState::Closed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The tag this session is bound to, `None` once disposed
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    pub fn technology(&self) -> Result<&T> {
        self.ensure_not_disposed()?;
        Ok(&*self.technology)
    }

    /// Connect unless the technology already reports a connection
    pub async fn open_if_closed(&mut self) -> Result<&T> {
        self.ensure_not_disposed()?;

        let tag = self.tag.as_ref().ok_or(TagError::SessionDisposed)?;
        if !tag.is_present() {
            return Err(TagError::device_read(format!(
                "tag {} is no longer in the field",
                tag.id_hex()
            )));
        }

        if !self.technology.is_connected() {
            debug!("connecting {} on tag {}", self.technology.kind(), tag.id_hex());
            self.technology.connect().await.map_err_str(TagError::Io)?;
        }

        self.state = SessionState::Open;
        Ok(&*self.technology)
    }

    pub async fn close(&mut self) -> Result<()> {
        if self.state == SessionState::Disposed {
            return Ok(());
        }

        if self.technology.is_connected() {
            debug!("closing {}", self.technology.kind());
            self.technology.close().await.map_err_str(TagError::Io)?;
        }

        self.state = SessionState::Closed;
        Ok(())
    }

    /// Close, then release the technology, then the tag
    ///
    /// Every step runs even if closing fails, calling this again does nothing
    pub async fn dispose(&mut self) {
        if self.state == SessionState::Disposed {
            return;
        }

        if let Err(error) = self.close().await {
            warn!("failed to close {} during dispose: {error}", self.technology.kind());
        }

        self.state = SessionState::Disposed;
        self.technology.dispose();

        if let Some(tag) = self.tag.take() {
            debug!("released {} session for tag {}", self.technology.kind(), tag.id_hex());
        }
    }

    fn ensure_not_disposed(&self) -> Result<()> {
        match self.state {
            SessionState::Disposed => Err(TagError::SessionDisposed),
            _ => Ok(()),
        }
    }
}

impl<T: ?Sized + Technology> Drop for TechnologySession<T> {
    fn drop(&mut self) {
        if self.state == SessionState::Disposed {
            return;
        }

        warn!("{} session dropped without being disposed", self.technology.kind());
        self.state = SessionState::Disposed;
        self.technology.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{tag::TechnologyKind, technology::mock::MockTechnology};

    fn session() -> (Arc<MockTechnology>, TechnologySession<MockTechnology>) {
        let mock = Arc::new(MockTechnology::new(TechnologyKind::NfcA));
        let tag = Tag::new(vec![0x04, 0x11], vec![TechnologyKind::NfcA]);
        (mock.clone(), TechnologySession::new(tag, mock))
    }

    #[tokio::test]
    async fn open_twice_connects_once() {
        let (mock, mut session) = session();

        session.open_if_closed().await.unwrap();
        session.open_if_closed().await.unwrap();

        assert_eq!(MockTechnology::count(&mock.connect_calls), 1);
        assert_eq!(session.state(), SessionState::Open);
        session.dispose().await;
    }

    #[tokio::test]
    async fn close_when_closed_is_a_no_op() {
        let (mock, mut session) = session();

        session.close().await.unwrap();
        assert_eq!(MockTechnology::count(&mock.close_calls), 0);

        session.open_if_closed().await.unwrap();
        session.close().await.unwrap();
        session.close().await.unwrap();
        assert_eq!(MockTechnology::count(&mock.close_calls), 1);
        assert_eq!(session.state(), SessionState::Closed);
        session.dispose().await;
    }

    #[tokio::test]
    async fn dispose_is_idempotent_and_ordered() {
        let (mock, mut session) = session();
        session.open_if_closed().await.unwrap();

        session.dispose().await;
        session.dispose().await;

        assert_eq!(*mock.events.lock(), vec!["connect", "close", "dispose"]);
        assert_eq!(MockTechnology::count(&mock.dispose_calls), 1);
        assert!(session.tag().is_none());
    }

    #[tokio::test]
    async fn dispose_releases_even_when_close_fails() {
        let (mock, mut session) = session();
        session.open_if_closed().await.unwrap();
        mock.fail_close.store(true, Ordering::SeqCst);

        session.dispose().await;

        assert_eq!(MockTechnology::count(&mock.dispose_calls), 1);
        assert_eq!(session.state(), SessionState::Disposed);
        assert!(session.tag().is_none());
    }

    #[tokio::test]
    async fn disposed_session_is_a_state_error() {
        let (_mock, mut session) = session();
        session.dispose().await;

        assert_eq!(session.open_if_closed().await.err(), Some(TagError::SessionDisposed));
        assert_eq!(session.technology().err(), Some(TagError::SessionDisposed));
    }

    #[tokio::test]
    async fn connect_failure_is_io() {
        let (mock, mut session) = session();
        mock.fail_connect.store(true, Ordering::SeqCst);

        let error = session.open_if_closed().await.unwrap_err();

        assert!(matches!(error, TagError::Io(_)));
        assert_eq!(session.state(), SessionState::Closed);
        session.dispose().await;
    }

    #[tokio::test]
    async fn lost_tag_fails_without_connecting() {
        let (mock, mut session) = session();
        session.tag().unwrap().mark_lost();

        let error = session.open_if_closed().await.unwrap_err();

        assert!(matches!(error, TagError::DeviceRead(_)));
        assert_eq!(MockTechnology::count(&mock.connect_calls), 0);
        session.dispose().await;
    }

    #[test]
    fn drop_without_dispose_releases_technology() {
        let (mock, session) = session();
        drop(session);

        assert_eq!(MockTechnology::count(&mock.dispose_calls), 1);
    }
}
