// ============================================================================
// ROUTER - Decide qué página se monta en #root y qué viewmodel la controla
// ============================================================================
// Rutas:
//   "/" o ""               → login
//   "#employee/bills"      → carga + lista de notas
//   "#employee/bill/new"   → formulario de nueva nota
//   cualquier otra         → "Erreur 404"
// Las rutas de empleado sin sesión válida vuelven al login.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::dom::{Document, ElementRef};
use crate::error::AppError;
use crate::routes::{Navigator, Route, SharedNavigator};
use crate::services::SharedStore;
use crate::state::SessionState;
use crate::utils::{
    spawn_local, SharedStorage, ACTIVE_ICON_CLASS, APP_BACKGROUND, LOGIN_BACKGROUND, ROOT_ELEMENT_ID,
};
use crate::viewmodels::{BillsViewModel, LoginViewModel, NewBillViewModel};
use crate::views::{render_route, BillsPage, MAIL_ICON_ID, WINDOW_ICON_ID};

type RouteListener = Rc<dyn Fn(&str)>;

struct RouterInner {
    document: Document,
    root: ElementRef,
    storage: SharedStorage,
    store: Option<SharedStore>,
    session: SessionState,
    current: Cell<Option<Route>>,
    path: RefCell<String>,
    // Se incrementa en cada navegación; una carga que termina tarde se descarta
    generation: Cell<u64>,
    listeners: RefCell<Vec<RouteListener>>,
}

#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

/// Handle débil que los viewmodels usan para navegar
struct RouterNavigator(Weak<RouterInner>);

impl Navigator for RouterNavigator {
    fn navigate(&self, path: &str) {
        match self.0.upgrade() {
            Some(inner) => Router { inner }.navigate(path),
            None => log::warn!("⚠️ [ROUTER] Navegación a '{}' tras cerrar la app", path),
        }
    }
}

impl Router {
    pub fn new(
        document: Document,
        storage: SharedStorage,
        store: Option<SharedStore>,
    ) -> Result<Self, AppError> {
        let root = document
            .get_element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| AppError::Dom(format!("No #{} element found", ROOT_ELEMENT_ID)))?;

        Ok(Self {
            inner: Rc::new(RouterInner {
                session: SessionState::new(storage.clone()),
                document,
                root,
                storage,
                store,
                current: Cell::new(None),
                path: RefCell::new(String::new()),
                generation: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    pub fn navigator(&self) -> SharedNavigator {
        Rc::new(RouterNavigator(Rc::downgrade(&self.inner)))
    }

    /// Ruta mostrada (`None` = página 404)
    pub fn current_route(&self) -> Option<Route> {
        self.inner.current.get()
    }

    /// Path de la página mostrada (tras la redirección al login, si la hubo)
    pub fn current_path(&self) -> String {
        self.inner.path.borrow().clone()
    }

    /// Callback tras cada navegación (el puente web lo usa para `location.hash`)
    pub fn on_navigate<F>(&self, callback: F)
    where
        F: Fn(&str) + 'static,
    {
        self.inner.listeners.borrow_mut().push(Rc::new(callback));
    }

    pub fn start(&self, initial_path: &str) {
        log::info!("🚀 [ROUTER] Arrancando en '{}'", initial_path);
        self.navigate(initial_path);
    }

    pub fn navigate(&self, path: &str) {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);

        let route = match Route::from_path(path) {
            None => {
                log::warn!("⚠️ [ROUTER] Ruta desconocida '{}'", path);
                self.inner.current.set(None);
                *self.inner.path.borrow_mut() = path.to_string();
                self.inner.document.body().set_style(APP_BACKGROUND);
                self.mount(None, BillsPage::Loading);
                self.notify(path);
                return;
            }
            Some(route) if route.requires_session() && !self.inner.session.is_logged_in() => {
                log::info!("🔒 [ROUTER] '{}' sin sesión, vuelta al login", path);
                Route::Login
            }
            Some(route) => route,
        };

        log::info!("🧭 [ROUTER] {:?}", route);
        self.inner.current.set(Some(route));
        *self.inner.path.borrow_mut() = route.path().to_string();
        let background = if route == Route::Login {
            LOGIN_BACKGROUND
        } else {
            APP_BACKGROUND
        };
        self.inner.document.body().set_style(background);

        match route {
            Route::Login => {
                self.mount(Some(Route::Login), BillsPage::Loading);
                LoginViewModel::new(
                    &self.inner.document,
                    self.navigator(),
                    self.inner.store.clone(),
                    self.inner.storage.clone(),
                );
            }
            Route::Bills => self.show_bills(generation),
            Route::NewBill => {
                self.mount(Some(Route::NewBill), BillsPage::Loading);
                self.highlight(Route::NewBill);
                NewBillViewModel::new(
                    self.inner.document.clone(),
                    self.navigator(),
                    self.inner.store.clone(),
                    self.inner.storage.clone(),
                );
            }
        }
        self.notify(route.path());
    }

    fn show_bills(&self, generation: u64) {
        self.mount(Some(Route::Bills), BillsPage::Loading);
        self.highlight(Route::Bills);
        let vm = self.bills_viewmodel();

        let router = self.clone();
        spawn_local(async move {
            let result = vm.get_bills().await;
            if router.inner.generation.get() != generation {
                log::debug!("🔁 [ROUTER] Carga de notas obsoleta, se descarta");
                return;
            }
            match result {
                Ok(rows) => {
                    router.mount(Some(Route::Bills), BillsPage::Loaded(&rows));
                    router.highlight(Route::Bills);
                    router.bills_viewmodel();
                }
                Err(e) => {
                    log::error!("❌ [ROUTER] Error cargando las notas: {}", e);
                    let label = e.to_string();
                    router.mount(Some(Route::Bills), BillsPage::Failed(&label));
                    router.highlight(Route::Bills);
                    router.bills_viewmodel();
                }
            }
        });
    }

    fn bills_viewmodel(&self) -> Rc<BillsViewModel> {
        BillsViewModel::new(
            self.inner.document.clone(),
            self.navigator(),
            self.inner.store.clone(),
            self.inner.storage.clone(),
        )
    }

    fn mount(&self, route: Option<Route>, page: BillsPage<'_>) {
        let content = render_route(&self.inner.document, route, page);
        self.inner.root.replace_children(&content);
    }

    /// Icono activo de la barra vertical según la página
    pub fn highlight(&self, route: Route) {
        let (active, inactive) = match route {
            Route::Bills => (WINDOW_ICON_ID, MAIL_ICON_ID),
            Route::NewBill => (MAIL_ICON_ID, WINDOW_ICON_ID),
            Route::Login => return,
        };
        let document = &self.inner.document;
        if let Some(icon) = document.get_element_by_id(active) {
            icon.add_class(ACTIVE_ICON_CLASS);
        }
        if let Some(icon) = document.get_element_by_id(inactive) {
            icon.remove_class(ACTIVE_ICON_CLASS);
        }
    }

    fn notify(&self, path: &str) {
        let listeners: Vec<RouteListener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(path);
        }
    }
}
