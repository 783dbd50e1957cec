use boxcraft_types::Role;

use crate::navigate::{HOME_PATH, LOGIN_PATH};
use crate::session::{Session, SessionContext};

/// Anything that can answer "who is signed in, if anyone".
pub trait RoleSource {
    fn is_loading(&self) -> bool;
    /// `None` when nobody is authenticated.
    fn authenticated_role(&self) -> Option<Role>;
}

impl RoleSource for Session {
    fn is_loading(&self) -> bool {
        false
    }

    fn authenticated_role(&self) -> Option<Role> {
        self.role()
    }
}

impl RoleSource for SessionContext {
    fn is_loading(&self) -> bool {
        SessionContext::is_loading(self)
    }

    fn authenticated_role(&self) -> Option<Role> {
        self.role()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Dashboard,
    Users,
    Products,
    Bulletins,
}

impl AdminSection {
    pub const ALL: [AdminSection; 4] = [
        AdminSection::Dashboard,
        AdminSection::Users,
        AdminSection::Products,
        AdminSection::Bulletins,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "/admin",
            AdminSection::Users => "/admin/users",
            AdminSection::Products => "/admin/products",
            AdminSection::Bulletins => "/admin/bulletins",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Users => "Users",
            AdminSection::Products => "Products",
            AdminSection::Bulletins => "Bulletins",
        }
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            AdminSection::Dashboard | AdminSection::Bulletins => {
                &[Role::Admin, Role::HrUser, Role::SalesUser]
            }
            AdminSection::Users => &[Role::Admin, Role::HrUser],
            AdminSection::Products => &[Role::Admin, Role::SalesUser],
        }
    }

    /// Section owning `path`, including nested paths such as `/admin/users/12`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = path.trim_end_matches('/');
        let mut segments = path.trim_start_matches('/').split('/');

        if segments.next() != Some("admin") {
            return None;
        }
        match segments.next() {
            None => Some(AdminSection::Dashboard),
            Some("users") => Some(AdminSection::Users),
            Some("products") => Some(AdminSection::Products),
            Some("bulletins") => Some(AdminSection::Bulletins),
            Some(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not restored yet; render nothing and do not redirect.
    Loading,
    Render,
    Redirect(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: &'static [Role],
}

impl RouteGuard {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn for_section(section: AdminSection) -> Self {
        Self::new(section.allowed_roles())
    }

    /// Guard for a path; `None` for public paths.
    pub fn for_path(path: &str) -> Option<Self> {
        AdminSection::from_path(path).map(Self::for_section)
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    pub fn decide<S: RoleSource + ?Sized>(&self, source: &S) -> GuardDecision {
        if source.is_loading() {
            return GuardDecision::Loading;
        }
        match source.authenticated_role() {
            None => GuardDecision::Redirect(LOGIN_PATH),
            Some(role) if self.permits(role) => GuardDecision::Render,
            Some(_) => GuardDecision::Redirect(HOME_PATH),
        }
    }
}

/// Admin sections a role may open, in menu order.
pub fn visible_sections(role: Role) -> Vec<AdminSection> {
    AdminSection::ALL
        .into_iter()
        .filter(|section| section.allowed_roles().contains(&role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxcraft_types::{User, UserStatus};

    fn session_as(role: Role) -> Session {
        Session {
            user: Some(User {
                id: 1,
                name: "Tester".into(),
                email: "tester@example.com".into(),
                role,
                status: UserStatus::Active,
                created_at: None,
            }),
            access_token: Some("token".into()),
            refresh_token: None,
        }
    }

    #[test]
    fn customer_is_sent_home_from_user_admin() {
        let guard = RouteGuard::for_path("/admin/users").unwrap();
        assert_eq!(
            guard.decide(&session_as(Role::CustomerUser)),
            GuardDecision::Redirect("/")
        );
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login() {
        let guard = RouteGuard::for_path("/admin/products").unwrap();
        assert_eq!(
            guard.decide(&Session::default()),
            GuardDecision::Redirect("/login")
        );
    }

    #[test]
    fn user_without_token_counts_as_anonymous() {
        let mut session = session_as(Role::Admin);
        session.access_token = None;
        let guard = RouteGuard::for_section(AdminSection::Dashboard);
        assert_eq!(guard.decide(&session), GuardDecision::Redirect("/login"));
    }

    #[test]
    fn permitted_roles_render() {
        let users = RouteGuard::for_section(AdminSection::Users);
        assert_eq!(users.decide(&session_as(Role::Admin)), GuardDecision::Render);
        assert_eq!(users.decide(&session_as(Role::HrUser)), GuardDecision::Render);
        assert_eq!(
            users.decide(&session_as(Role::SalesUser)),
            GuardDecision::Redirect("/")
        );

        let products = RouteGuard::for_section(AdminSection::Products);
        assert_eq!(products.decide(&session_as(Role::SalesUser)), GuardDecision::Render);
    }

    #[test]
    fn loading_context_waits() {
        use crate::storage::MemoryStore;
        use std::sync::Arc;

        let ctx = SessionContext::new(Arc::new(MemoryStore::new()));
        let guard = RouteGuard::for_section(AdminSection::Dashboard);
        assert_eq!(guard.decide(&ctx), GuardDecision::Loading);

        ctx.restore();
        assert_eq!(guard.decide(&ctx), GuardDecision::Redirect("/login"));
    }

    #[test]
    fn paths_resolve_to_sections() {
        assert_eq!(AdminSection::from_path("/admin"), Some(AdminSection::Dashboard));
        assert_eq!(AdminSection::from_path("/admin/"), Some(AdminSection::Dashboard));
        assert_eq!(AdminSection::from_path("/admin/users/12"), Some(AdminSection::Users));
        assert_eq!(
            AdminSection::from_path("/admin/bulletins?page=2"),
            Some(AdminSection::Bulletins)
        );
        assert_eq!(AdminSection::from_path("/products"), None);
        assert_eq!(AdminSection::from_path("/administrator"), None);
        assert!(RouteGuard::for_path("/contact").is_none());
    }

    #[test]
    fn menu_follows_role() {
        assert_eq!(visible_sections(Role::Admin).len(), 4);
        assert_eq!(
            visible_sections(Role::SalesUser),
            vec![
                AdminSection::Dashboard,
                AdminSection::Products,
                AdminSection::Bulletins
            ]
        );
        assert!(visible_sections(Role::CustomerUser).is_empty());
    }
}
