// ============================================================================
// ROUTER - Navegación completa con App + MockStore
// ============================================================================

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::support::{employee_storage, EMPLOYEE_EMAIL};
use crate::app::App;
use crate::dom::Document;
use crate::error::AppError;
use crate::router::Router;
use crate::routes::Route;
use crate::services::{MockStore, SharedStore};
use crate::state::SessionState;
use crate::utils::{
    run_until_stalled, KeyValueStorage, MemoryStorage, SharedStorage, ACTIVE_ICON_CLASS, APP_BACKGROUND,
    JWT_STORAGE_KEY, LOGIN_BACKGROUND, USER_STORAGE_KEY,
};

fn app_with(storage: SharedStorage, store: Option<Rc<MockStore>>) -> App {
    App::new(Document::new(), storage, store.map(|store| store as SharedStore))
        .expect("App::new creates #root")
}

fn icon_class(app: &App, test_id: &str) -> String {
    app.document().get_by_test_id(test_id).unwrap().class_name()
}

#[test]
fn router_requires_a_root_element() {
    let err = Router::new(Document::new(), MemoryStorage::shared(), None).err();
    assert!(matches!(err, Some(AppError::Dom(_))));
}

#[test]
fn bills_page_shows_loading_then_the_list() {
    let store = MockStore::shared();
    let app = app_with(employee_storage(), Some(store.clone()));
    app.start(Route::Bills.path());

    assert!(app.document().contains_text("Loading..."));
    run_until_stalled();

    let doc = app.document();
    assert!(!doc.contains_text("Loading..."));
    assert_eq!(doc.query_selector_all("tbody tr").len(), 4);
    assert_eq!(store.api().list_calls(), 1);
    assert_eq!(app.router().current_route(), Some(Route::Bills));
}

#[test]
fn bills_page_highlights_only_the_window_icon() {
    let app = app_with(employee_storage(), Some(MockStore::shared()));
    app.start(Route::Bills.path());
    run_until_stalled();

    assert_eq!(icon_class(&app, "icon-window"), ACTIVE_ICON_CLASS);
    assert_eq!(icon_class(&app, "icon-mail"), "");
}

#[test]
fn new_bill_page_highlights_only_the_mail_icon() {
    let app = app_with(employee_storage(), Some(MockStore::shared()));
    app.start(Route::NewBill.path());

    assert!(app.document().get_by_test_id("form-new-bill").is_some());
    assert_eq!(icon_class(&app, "icon-mail"), ACTIVE_ICON_CLASS);
    assert_eq!(icon_class(&app, "icon-window"), "");
}

#[test]
fn store_errors_render_the_error_page() {
    for status in [404, 500] {
        let store = MockStore::shared();
        store.fail_bills_once(AppError::http(status));
        let app = app_with(employee_storage(), Some(store));
        app.start(Route::Bills.path());
        run_until_stalled();

        let message = app.document().get_by_test_id("error-message").unwrap();
        assert_eq!(message.text_content(), format!("Erreur {}", status));
        assert!(app.document().get_by_test_id("tbody").is_none());
    }
}

#[test]
fn unknown_path_renders_not_found() {
    let app = app_with(employee_storage(), None);
    app.start("#admin/dashboard");

    assert_eq!(app.router().current_route(), None);
    assert!(app.document().contains_text("Erreur 404"));
}

#[test]
fn protected_route_without_session_shows_login() {
    let app = app_with(MemoryStorage::shared(), Some(MockStore::shared()));
    app.start(Route::Bills.path());

    assert_eq!(app.router().current_route(), Some(Route::Login));
    assert!(app.document().get_by_test_id("form-employee").is_some());
    assert_eq!(app.document().body().attr("style").as_deref(), Some(LOGIN_BACKGROUND));
}

#[test]
fn login_stores_the_session_and_opens_bills() {
    let storage = MemoryStorage::shared();
    let app = app_with(storage.clone(), Some(MockStore::shared()));
    app.start("/");

    let doc = app.document();
    doc.get_by_test_id("employee-email-input").unwrap().set_value(EMPLOYEE_EMAIL);
    doc.get_by_test_id("employee-password-input").unwrap().set_value("azerty");
    doc.get_by_test_id("form-employee").unwrap().submit();
    run_until_stalled();

    assert_eq!(SessionState::new(storage.clone()).email(), EMPLOYEE_EMAIL);
    assert!(storage.get_item(JWT_STORAGE_KEY).is_some());
    assert_eq!(app.router().current_route(), Some(Route::Bills));
    assert_eq!(doc.query_selector_all("tbody tr").len(), 4);
    assert_eq!(doc.body().attr("style").as_deref(), Some(APP_BACKGROUND));
}

#[test]
fn rejected_login_still_opens_bills_without_jwt() {
    let storage = MemoryStorage::shared();
    let store = MockStore::shared();
    store.set_fail_login(true);
    let app = app_with(storage.clone(), Some(store));
    app.start("/");

    let doc = app.document();
    doc.get_by_test_id("employee-email-input").unwrap().set_value(EMPLOYEE_EMAIL);
    doc.get_by_test_id("form-employee").unwrap().submit();
    run_until_stalled();

    assert!(storage.get_item(JWT_STORAGE_KEY).is_none());
    assert_eq!(app.router().current_route(), Some(Route::Bills));
}

#[test]
fn disconnect_returns_to_login() {
    let storage = employee_storage();
    let app = app_with(storage.clone(), Some(MockStore::shared()));
    app.start(Route::Bills.path());
    run_until_stalled();

    app.document().get_by_test_id("layout-disconnect").unwrap().click();

    assert!(storage.get_item(USER_STORAGE_KEY).is_none());
    assert_eq!(app.router().current_route(), Some(Route::Login));
    assert!(app.document().get_by_test_id("form-employee").is_some());
}

#[test]
fn new_bill_button_opens_the_form() {
    let app = app_with(employee_storage(), Some(MockStore::shared()));
    app.start(Route::Bills.path());
    run_until_stalled();

    app.document().get_by_test_id("btn-new-bill").unwrap().click();

    assert_eq!(app.router().current_route(), Some(Route::NewBill));
    assert_eq!(app.router().current_path(), Route::NewBill.path());
    assert!(app.document().get_by_test_id("form-new-bill").is_some());
}

#[test]
fn late_bills_response_is_discarded_after_navigating_away() {
    let store = MockStore::shared();
    let app = app_with(employee_storage(), Some(store.clone()));
    app.start(Route::Bills.path());
    app.router().navigate(Route::NewBill.path());
    run_until_stalled();

    assert_eq!(store.api().list_calls(), 1);
    assert!(app.document().get_by_test_id("form-new-bill").is_some());
    assert!(app.document().get_by_test_id("tbody").is_none());
}

#[test]
fn navigation_listeners_see_the_resolved_path() {
    let app = app_with(MemoryStorage::shared(), None);
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = seen.clone();
    app.router().on_navigate(move |path| sink.borrow_mut().push(path.to_string()));

    app.start(Route::NewBill.path());
    assert_eq!(*seen.borrow(), vec![Route::Login.path().to_string()]);
}

#[test]
fn page_round_trips_reuse_the_node_arena() {
    let app = app_with(employee_storage(), Some(MockStore::shared()));
    let round_trip = || {
        app.router().navigate(Route::Bills.path());
        run_until_stalled();
        app.router().navigate(Route::NewBill.path());
        run_until_stalled();
    };
    app.start(Route::NewBill.path());
    round_trip();
    let capacity = app.document().arena_capacity();
    let live = app.document().node_count();

    for _ in 0..200 {
        round_trip();
    }

    assert_eq!(app.document().arena_capacity(), capacity);
    assert_eq!(app.document().node_count(), live);
    assert!(app.document().get_by_test_id("form-new-bill").is_some());
}
