// ============================================================================
// ROUTES - Tabla de rutas + capacidad Navigator
// ============================================================================

use std::rc::Rc;

/// Páginas conocidas de la aplicación
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Login, Route::Bills, Route::NewBill];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    /// "" se trata como la raíz
    pub fn from_path(path: &str) -> Option<Route> {
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Las páginas de empleado exigen sesión
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Capacidad de navegación inyectada en cada viewmodel
pub trait Navigator {
    fn navigate(&self, path: &str);

    fn navigate_to(&self, route: Route) {
        self.navigate(route.path());
    }
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

pub type SharedNavigator = Rc<dyn Navigator>;
