use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use boxcraft_types::{AuthResponse, Role, User};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::storage::KeyValueStore;

pub const USER_KEY: &str = "user";
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const SESSION_KEYS: [&str; 3] = [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    /// Role of the signed-in user; `None` unless authenticated.
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated() {
            return None;
        }
        self.user.as_ref().map(|u| u.role)
    }
}

impl From<&AuthResponse> for Session {
    fn from(auth: &AuthResponse) -> Self {
        Self {
            user: Some(auth.user.clone()),
            access_token: Some(auth.access_token.clone()),
            refresh_token: auth.refresh_token.clone(),
        }
    }
}

type Listener = Box<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    storage: Arc<dyn KeyValueStore>,
    session: RwLock<Session>,
    loading: AtomicBool,
    listeners: Mutex<Vec<Listener>>,
}

/// Shared handle on the current session and the storage it is persisted to.
///
/// Lifecycle: [`SessionContext::new`] starts in the loading state,
/// [`restore`](SessionContext::restore) reads storage, [`establish`](SessionContext::establish)
/// records a successful login and [`teardown`](SessionContext::teardown) clears memory and
/// storage. Subscribers are called after every change.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                storage,
                session: RwLock::new(Session::default()),
                loading: AtomicBool::new(true),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates the context and restores it from storage immediately.
    pub fn init(storage: Arc<dyn KeyValueStore>) -> Self {
        let ctx = Self::new(storage);
        ctx.restore();
        ctx
    }

    /// Reads the persisted session. The stored token is trusted as-is; an
    /// expired one surfaces as a 401 on the first request.
    pub fn restore(&self) -> Session {
        let storage = &self.inner.storage;
        let storedUser = storage.get(USER_KEY);
        let accessToken = storage.get(ACCESS_TOKEN_KEY);

        let restored = match (storedUser, accessToken) {
            (Some(userJson), Some(token)) => match serde_json::from_str::<User>(&userJson) {
                Ok(user) => {
                    debug!("restored session for user {}", user.id);
                    Session {
                        user: Some(user),
                        access_token: Some(token),
                        refresh_token: storage.get(REFRESH_TOKEN_KEY),
                    }
                }
                Err(e) => {
                    warn!("discarding unreadable stored user: {e}");
                    self.clear_storage();
                    Session::default()
                }
            },
            _ => Session::default(),
        };

        self.replace(restored.clone());
        restored
    }

    /// Persists and activates the session returned by a successful login.
    pub fn establish(&self, auth: &AuthResponse) -> Result<(), ClientError> {
        if let Err(e) = self.persist(auth) {
            warn!("could not persist session, signing out: {e}");
            self.teardown();
            return Err(e);
        }
        self.replace(Session::from(auth));
        Ok(())
    }

    pub fn teardown(&self) {
        self.clear_storage();
        self.replace(Session::default());
    }

    pub fn snapshot(&self) -> Session {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    pub fn user(&self) -> Option<User> {
        self.snapshot().user
    }

    pub fn role(&self) -> Option<Role> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .role()
    }

    /// Token as currently persisted, which is what outgoing requests carry.
    pub fn stored_access_token(&self) -> Option<String> {
        self.inner.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    fn persist(&self, auth: &AuthResponse) -> Result<(), ClientError> {
        let storage = &self.inner.storage;
        let userJson =
            serde_json::to_string(&auth.user).map_err(|e| ClientError::Storage(e.to_string()))?;
        storage.set(USER_KEY, &userJson)?;
        storage.set(ACCESS_TOKEN_KEY, &auth.access_token)?;
        match &auth.refresh_token {
            Some(token) => storage.set(REFRESH_TOKEN_KEY, token)?,
            None => storage.remove(REFRESH_TOKEN_KEY),
        }
        Ok(())
    }

    fn clear_storage(&self) {
        for key in SESSION_KEYS {
            self.inner.storage.remove(key);
        }
    }

    fn replace(&self, session: Session) {
        {
            let mut current = self
                .inner
                .session
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *current = session.clone();
        }
        self.inner.loading.store(false, Ordering::SeqCst);

        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(&session);
        }
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("loading", &self.is_loading())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use boxcraft_types::UserStatus;
    use std::sync::atomic::AtomicUsize;

    fn sample_auth(role: Role) -> AuthResponse {
        AuthResponse {
            user: User {
                id: 3,
                name: "Dewi".into(),
                email: "dewi@example.com".into(),
                role,
                status: UserStatus::Active,
                created_at: None,
            },
            access_token: "access-1".into(),
            refresh_token: Some("refresh-1".into()),
        }
    }

    #[test]
    fn new_context_is_loading_until_restored() {
        let ctx = SessionContext::new(Arc::new(MemoryStore::new()));
        assert!(ctx.is_loading());
        assert!(!ctx.is_authenticated());

        ctx.restore();
        assert!(!ctx.is_loading());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn establish_writes_all_three_keys() {
        let storage = Arc::new(MemoryStore::new());
        let ctx = SessionContext::init(storage.clone());

        ctx.establish(&sample_auth(Role::Admin)).unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.role(), Some(Role::Admin));
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("access-1"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));
        let stored: User = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored.email, "dewi@example.com");
    }

    #[test]
    fn restore_trusts_storage_without_validation() {
        let storage = Arc::new(MemoryStore::new());
        SessionContext::init(storage.clone())
            .establish(&sample_auth(Role::SalesUser))
            .unwrap();

        let restarted = SessionContext::init(storage);
        assert!(restarted.is_authenticated());
        assert_eq!(restarted.role(), Some(Role::SalesUser));
        assert_eq!(restarted.snapshot().refresh_token.as_deref(), Some("refresh-1"));
    }

    #[test]
    fn restore_needs_both_user_and_token() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(ACCESS_TOKEN_KEY, "orphan").unwrap();

        let ctx = SessionContext::init(storage.clone());
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.role(), None);
    }

    #[test]
    fn unreadable_user_clears_storage() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(USER_KEY, "{broken").unwrap();
        storage.set(ACCESS_TOKEN_KEY, "t").unwrap();

        let ctx = SessionContext::init(storage.clone());
        assert!(!ctx.is_authenticated());
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key), None, "{key} should be cleared");
        }
    }

    /// Accepts writes until `failing_key` is set.
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: Mutex<Option<&'static str>>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
            if *self.failing_key.lock().unwrap() == Some(key) {
                return Err(ClientError::Storage(format!("quota exceeded writing {key}")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_persist_signs_out_previous_user() {
        let storage = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            failing_key: Mutex::new(None),
        });
        let ctx = SessionContext::init(storage.clone());
        ctx.establish(&sample_auth(Role::Admin)).unwrap();

        let notified = Arc::new(AtomicUsize::new(0));
        let seen = notified.clone();
        ctx.subscribe(move |session| {
            assert!(!session.is_authenticated());
            seen.fetch_add(1, Ordering::SeqCst);
        });

        *storage.failing_key.lock().unwrap() = Some(ACCESS_TOKEN_KEY);
        let mut next = sample_auth(Role::HrUser);
        next.user.id = 4;
        next.access_token = "access-2".into();

        assert!(matches!(ctx.establish(&next), Err(ClientError::Storage(_))));
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.user(), None);
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key), None, "{key} should be cleared");
        }
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn teardown_clears_memory_storage_and_notifies() {
        let storage = Arc::new(MemoryStore::new());
        let ctx = SessionContext::init(storage.clone());
        ctx.establish(&sample_auth(Role::Admin)).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        ctx.subscribe(move |session| {
            assert!(!session.is_authenticated());
            seen.fetch_add(1, Ordering::SeqCst);
        });

        ctx.teardown();

        assert!(!ctx.is_authenticated());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key), None);
        }
    }

    #[test]
    fn missing_refresh_token_removes_stale_key() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(REFRESH_TOKEN_KEY, "old").unwrap();
        let ctx = SessionContext::init(storage.clone());

        let mut auth = sample_auth(Role::User);
        auth.refresh_token = None;
        ctx.establish(&auth).unwrap();

        assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
        assert!(ctx.is_authenticated());
    }
}
