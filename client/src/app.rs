//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host renders `shell` for every UI path. `App` builds the shared
//! services once per load, provides them as `AppContext`, and mounts one
//! route per navigation state. Parent states route to
//! `DefaultChildRedirect`, which asks the state registry where to go.
//!
//! `<App/>` is the only child of `<body>`: hydration walks the body from its
//! first node, so everything the client reads back is rendered by `App`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use records::Endpoints;

use crate::components::{nav_bar::NavBar, toasts::Toasts};
use crate::controllers::{
    ComponentController, EduMfaServerController, MachineController, RecoveryController, Services,
};
use crate::events::{AppEvent, EventBus, Topic};
use crate::i18n::{Catalog, SOURCE_LANGUAGE};
use crate::nav::{SignalNavigator, StateRegistry};
use crate::net::api::Api;
use crate::net::transport::BrowserTransport;
use crate::pages::{
    component::ComponentPage,
    edumfa_server::{EduMfaServerFormPage, EduMfaServerListPage},
    home::HomePage,
    machine::{MachineDetailsPage, MachineListPage},
    recovery::{RecoveryPage, ResetPage},
    redirect::DefaultChildRedirect,
};
use crate::state::auth::SessionAuth;
use crate::state::notify::Notifications;
use crate::state::store::Store;
use crate::util::{dom, task};
use crate::version::{self, RANDOM_VERSION_STRING_LENGTH, VERSION_ELEMENT_ID, VersionSuffix};

/// Hidden input carrying the UI language the host picked.
pub const LANGUAGE_ELEMENT_ID: &str = "EDUMFA_LANGUAGE";

/// Values the host injects into the page for the client to read at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bootstrap {
    /// Release version; empty for development builds.
    pub release: String,
    /// Path prefix the UI and backend are mounted under.
    pub instance: String,
    /// Language tag both render passes translate into; empty for the source
    /// language.
    pub language: String,
}

impl Bootstrap {
    /// Read the values `BootstrapInputs` rendered into the page.
    #[must_use]
    pub fn from_dom() -> Self {
        Self {
            release: dom::input_value(VERSION_ELEMENT_ID).unwrap_or_default(),
            instance: dom::instance_url(),
            language: dom::input_value(LANGUAGE_ELEMENT_ID).unwrap_or_default(),
        }
    }

    /// `(element id, value)` of every hidden input, in render order.
    #[must_use]
    pub fn inputs(&self) -> [(&'static str, String); 3] {
        [
            (VERSION_ELEMENT_ID, self.release.clone()),
            (dom::INSTANCE_ELEMENT_ID, self.instance.clone()),
            (LANGUAGE_ELEMENT_ID, self.language.clone()),
        ]
    }
}

/// Everything pages need, provided once by `App`.
#[derive(Clone)]
pub struct AppContext {
    pub services: Services,
    pub servers: EduMfaServerController,
    pub machines: MachineController,
    pub components: ComponentController,
    pub recovery: RecoveryController,
    pub auth: SessionAuth,
}

impl AppContext {
    #[must_use]
    pub fn new(services: Services, auth: SessionAuth) -> Self {
        Self {
            servers: EduMfaServerController::new(services.clone(), Store::default()),
            machines: MachineController::new(services.clone(), Store::default()),
            components: ComponentController::new(services.clone(), Store::default()),
            recovery: RecoveryController::new(services.clone(), Store::default()),
            services,
            auth,
        }
    }

    /// Wire the browser collaborators around `instance` and `suffix`.
    #[must_use]
    pub fn browser(instance: &str, suffix: &VersionSuffix, language: &str, navigator: SignalNavigator) -> Self {
        let catalog = Arc::new(Catalog::embedded(language));
        let notifications = Notifications::new();
        let bus = EventBus::new();
        let auth = SessionAuth::new(notifications.clone(), bus.clone(), Arc::clone(&catalog));
        let registry = StateRegistry::new(instance, suffix);
        if let Err(e) = registry.validate() {
            log::error!("navigation state table is inconsistent: {e}");
        }
        let services = Services {
            api: Api::new(Arc::new(BrowserTransport), Arc::new(auth.clone()), Endpoints::new(instance)),
            notifications,
            navigator: Arc::new(navigator),
            catalog,
            registry: Arc::new(registry),
            bus,
        };
        Self::new(services, auth)
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions, boot: Bootstrap) -> impl IntoView {
    let suffix = version::install(&boot.release, RANDOM_VERSION_STRING_LENGTH);
    let stylesheet = suffix.decorate(&format!("{}/pkg/edumfa-webui.css", boot.instance));
    let lang = if boot.language.is_empty() { SOURCE_LANGUAGE.to_owned() } else { boot.language.clone() };
    provide_context(boot);
    view! {
        <!DOCTYPE html>
        <html lang=lang>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" id="leptos" href=stylesheet/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared services and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // The host provides its bootstrap during SSR; the browser reads it back
    // from the rendered page.
    let boot = use_context::<Bootstrap>().unwrap_or_else(Bootstrap::from_dom);
    let instance = dom::normalize_instance(&boot.instance);
    let suffix = version::install(&boot.release, RANDOM_VERSION_STRING_LENGTH);

    let nav_target = RwSignal::new(None::<String>);
    let ctx = AppContext::browser(&instance, suffix, &boot.language, SignalNavigator::new(nav_target));
    provide_context(ctx.clone());

    // An expired session leaves the admin UI for the login page.
    let mut expired = ctx.services.bus.subscribe(Topic::AuthExpired);
    let login = format!("{instance}/");
    task::spawn(async move {
        if let Some(AppEvent::AuthExpired { status }) = expired.next().await {
            log::info!("session rejected with {status}, returning to login");
            dom::redirect(&login);
        }
    });

    view! {
        <BootstrapInputs boot=boot/>
        <Router>
            <Navigation target=nav_target/>
            <NavBar/>
            <Toasts/>
            <main class="content">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("component") view=DefaultChildRedirect/>
                    <Route path=(StaticSegment("component"), StaticSegment("clienttype")) view=ComponentPage/>
                    <Route path=StaticSegment("machine") view=DefaultChildRedirect/>
                    <Route path=(StaticSegment("machine"), StaticSegment("list")) view=MachineListPage/>
                    <Route
                        path=(
                            StaticSegment("machine"),
                            StaticSegment("details"),
                            ParamSegment("machineid"),
                            ParamSegment("machineresolver"),
                        )
                        view=MachineDetailsPage
                    />
                    <Route path=StaticSegment("recovery") view=RecoveryPage/>
                    <Route
                        path=(StaticSegment("reset"), ParamSegment("user"), ParamSegment("recoverycode"))
                        view=ResetPage
                    />
                    <Route path=StaticSegment("config") view=DefaultChildRedirect/>
                    <Route path=(StaticSegment("config"), StaticSegment("edumfaserver")) view=DefaultChildRedirect/>
                    <Route
                        path=(StaticSegment("config"), StaticSegment("edumfaserver"), StaticSegment("list"))
                        view=EduMfaServerListPage
                    />
                    <Route
                        path=(StaticSegment("config"), StaticSegment("edumfaserver"), StaticSegment("new"))
                        view=EduMfaServerFormPage
                    />
                    <Route
                        path=(
                            StaticSegment("config"),
                            StaticSegment("edumfaserver"),
                            StaticSegment("edit"),
                            ParamSegment("identifier"),
                        )
                        view=EduMfaServerFormPage
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Hidden inputs `Bootstrap::from_dom` reads back after the page loads.
#[component]
pub fn BootstrapInputs(boot: Bootstrap) -> impl IntoView {
    boot.inputs()
        .into_iter()
        .map(|(id, value)| view! { <input type="hidden" id=id value=value/> })
        .collect_view()
}

/// Hands URLs requested by controllers to the router.
#[component]
fn Navigation(target: RwSignal<Option<String>>) -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(url) = target.get() {
            target.set(None);
            navigate(&url, NavigateOptions::default());
        }
    });
}
