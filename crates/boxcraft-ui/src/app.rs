use boxcraft_client::AdminSection;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::guard::RequireSection;
use crate::components::nav::{AdminNav, SiteNav};
use crate::components::toast::ToastProvider;
use crate::pages::about::AboutPage;
use crate::pages::admin::bulletins::AdminBulletinsPage;
use crate::pages::admin::dashboard::AdminDashboardPage;
use crate::pages::admin::products::AdminProductsPage;
use crate::pages::admin::users::AdminUsersPage;
use crate::pages::bulletin::{BulletinDetailPage, BulletinPage};
use crate::pages::contact::ContactPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::products::{ProductDetailPage, ProductsPage};
use crate::pages::register::RegisterPage;
use crate::session::SessionProvider;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/boxcraft-site.css" />
        <Title text="Boxcraft Packaging" />
        <SessionProvider>
            <ToastProvider>
                <Router>
                    <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }.into_any()>
                        <Route path=StaticSegment("") view=|| public(HomePage) />
                        <Route path=StaticSegment("about") view=|| public(AboutPage) />
                        <Route path=StaticSegment("products") view=|| public(ProductsPage) />
                        <Route
                            path=(StaticSegment("products"), ParamSegment("id"))
                            view=|| public(ProductDetailPage)
                        />
                        <Route path=StaticSegment("bulletin") view=|| public(BulletinPage) />
                        <Route
                            path=(StaticSegment("bulletin"), ParamSegment("id"))
                            view=|| public(BulletinDetailPage)
                        />
                        <Route path=StaticSegment("contact") view=|| public(ContactPage) />
                        <Route path=StaticSegment("login") view=LoginPage />
                        <Route path=StaticSegment("register") view=RegisterPage />
                        <Route
                            path=StaticSegment("admin")
                            view=|| admin(AdminSection::Dashboard, AdminDashboardPage)
                        />
                        <Route
                            path=(StaticSegment("admin"), StaticSegment("users"))
                            view=|| admin(AdminSection::Users, AdminUsersPage)
                        />
                        <Route
                            path=(StaticSegment("admin"), StaticSegment("products"))
                            view=|| admin(AdminSection::Products, AdminProductsPage)
                        />
                        <Route
                            path=(StaticSegment("admin"), StaticSegment("bulletins"))
                            view=|| admin(AdminSection::Bulletins, AdminBulletinsPage)
                        />
                    </Routes>
                </Router>
            </ToastProvider>
        </SessionProvider>
    }
}

fn public<F, V>(page: F) -> impl IntoView
where
    F: Fn() -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    view! {
        <div class="site-layout">
            <SiteNav />
            <main class="site-content">{page()}</main>
            <footer class="site-footer">
                <p>"\u{00A9} Boxcraft Packaging. Corrugated, rigid and retail packaging made to order."</p>
            </footer>
        </div>
    }
}

fn admin<F, V>(section: AdminSection, page: F) -> impl IntoView
where
    F: Fn() -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    view! {
        <RequireSection section=section>
            <div class="app-layout">
                <AdminNav />
                <main class="main-content">{page()}</main>
            </div>
        </RequireSection>
    }
}
