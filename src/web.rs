// ============================================================================
// WEB - Puente entre el documento en memoria y el DOM real del navegador
// ============================================================================
// - Cada cambio del documento programa (Timeout 0) un volcado de #root al DOM
//   real. Los nodos con listeners llevan `data-vid` con su handle.
// - Un único listener por tipo de evento en el #root real reenvía click,
//   submit y change al elemento virtual correspondiente.
// - Los valores de los controles se copian real → virtual antes de cada
//   volcado y de cada submit, y virtual → real después del volcado.
// - Un input file con archivos elegidos sobrevive al volcado tal cual.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::app::App;
use crate::config::CONFIG;
use crate::dom::{Document, ElementRef, EventKind};
use crate::models::SelectedFile;
use crate::services::{HttpStore, MockStore, SharedStore};
use crate::utils::{spawn_local, BrowserStorage, SharedStorage, ROOT_ELEMENT_ID};

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static SYNC_SCHEDULED: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 Billed - Rust puro + MVVM ({})", CONFIG.environment);

    let storage: SharedStorage = Rc::new(BrowserStorage);
    let store = build_store(storage.clone());
    let app = App::new(Document::new(), storage, Some(store))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let real_root = real_root().ok_or_else(|| JsValue::from_str("No #root element found"))?;
    install_delegation(&real_root)?;
    listen_hash_changes()?;

    app.document().subscribe(schedule_sync);
    app.router().on_navigate(|path| {
        let hash = if path == "/" { "" } else { path };
        if let Some(location) = web_sys::window().map(|w| w.location()) {
            if location.hash().unwrap_or_default() != hash {
                if let Err(e) = location.set_hash(hash) {
                    log::warn!("⚠️ [WEB] No se pudo actualizar location.hash: {:?}", e);
                }
            }
        }
    });

    let router = app.router().clone();
    APP.with(|cell| *cell.borrow_mut() = Some(app));
    router.start(&current_hash());
    Ok(())
}

fn build_store(storage: SharedStorage) -> SharedStore {
    if CONFIG.use_mock_store {
        log::warn!("⚠️ [WEB] USE_MOCK_STORE activo: datos de prueba");
        MockStore::shared() as SharedStore
    } else {
        log::info!("🌐 [WEB] Backend: {}", CONFIG.backend_url);
        Rc::new(HttpStore::new(storage))
    }
}

fn with_app<T>(f: impl FnOnce(&App) -> T) -> Option<T> {
    APP.with(|cell| cell.borrow().as_ref().map(f))
}

fn virtual_document() -> Option<Document> {
    with_app(|app| app.document().clone())
}

fn real_root() -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(ROOT_ELEMENT_ID)
}

fn current_hash() -> String {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    if hash.is_empty() {
        "/".to_string()
    } else {
        hash
    }
}

fn listen_hash_changes() -> Result<(), JsValue> {
    let Some(win) = web_sys::window() else {
        return Ok(());
    };
    let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
        let Some(router) = with_app(|app| app.router().clone()) else {
            return;
        };
        let target = current_hash();
        if target != router.current_path() {
            router.navigate(&target);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
    // Se registra una sola vez al arrancar
    closure.forget();
    Ok(())
}

// ============================================================================
// VOLCADO virtual → real
// ============================================================================

fn schedule_sync() {
    if SYNC_SCHEDULED.with(|scheduled| scheduled.replace(true)) {
        return;
    }
    Timeout::new(0, sync_root).forget();
}

fn sync_root() {
    SYNC_SCHEDULED.with(|scheduled| scheduled.set(false));
    let Some(document) = virtual_document() else {
        return;
    };
    let (Some(virtual_root), Some(real_root)) = (document.get_element_by_id(ROOT_ELEMENT_ID), real_root()) else {
        log::warn!("⚠️ [WEB] #{} no disponible para el volcado", ROOT_ELEMENT_ID);
        return;
    };

    pull_values(&real_root, &virtual_root);
    let live_files = live_file_inputs(&real_root, &virtual_root);
    real_root.set_inner_html(&virtual_root.mount_html());
    restore_file_inputs(&real_root, live_files);
    push_values(&real_root, &virtual_root);

    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let style = document.body().attr("style").unwrap_or_default();
        if let Err(e) = body.set_attribute("style", &style) {
            log::warn!("⚠️ [WEB] No se pudo aplicar el estilo del body: {:?}", e);
        }
    }
}

fn controls(scope: &Element) -> Vec<Element> {
    let Ok(list) = scope.query_selector_all("[data-testid]") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Valor de un control de formulario (los input file no se copian)
fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return (input.type_() != "file").then(|| input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    element.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

fn set_control_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if input.type_() != "file" {
            input.set_value(value);
        }
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Inputs file reales con archivos que el documento virtual aún conserva.
/// El navegador no deja reescribir su valor, así que el nodo vivo se reutiliza.
fn live_file_inputs(real_scope: &Element, virtual_scope: &ElementRef) -> Vec<(String, HtmlInputElement)> {
    controls(real_scope)
        .into_iter()
        .filter_map(|real| {
            let input = real.dyn_into::<HtmlInputElement>().ok()?;
            let has_files = input.files().is_some_and(|files| files.length() > 0);
            if input.type_() != "file" || !has_files {
                return None;
            }
            let test_id = input.get_attribute("data-testid")?;
            let target = virtual_scope.get_by_test_id(&test_id)?;
            (!target.files().is_empty()).then_some((test_id, input))
        })
        .collect()
}

fn restore_file_inputs(real_scope: &Element, live: Vec<(String, HtmlInputElement)>) {
    for (test_id, input) in live {
        let Ok(Some(fresh)) = real_scope.query_selector(&format!("[data-testid=\"{}\"]", test_id)) else {
            continue;
        };
        let vid = fresh.get_attribute("data-vid");
        let synced = match vid {
            Some(vid) => input.set_attribute("data-vid", &vid),
            None => input.remove_attribute("data-vid"),
        }
        .and_then(|_| fresh.replace_with_with_node_1(&input));
        if let Err(e) = synced {
            log::warn!("⚠️ [WEB] No se pudo conservar el input '{}': {:?}", test_id, e);
        }
    }
}

fn pull_values(real_scope: &Element, virtual_scope: &ElementRef) {
    for real in controls(real_scope) {
        let (Some(test_id), Some(value)) = (real.get_attribute("data-testid"), control_value(&real)) else {
            continue;
        };
        if let Some(target) = virtual_scope.get_by_test_id(&test_id) {
            target.set_value(&value);
        }
    }
}

fn push_values(real_scope: &Element, virtual_scope: &ElementRef) {
    for real in controls(real_scope) {
        let Some(test_id) = real.get_attribute("data-testid") else {
            continue;
        };
        if let Some(source) = virtual_scope.get_by_test_id(&test_id) {
            set_control_value(&real, &source.value());
        }
    }
}

// ============================================================================
// EVENTOS real → virtual
// ============================================================================

fn install_delegation(real_root: &Element) -> Result<(), JsValue> {
    for kind in [EventKind::Click, EventKind::Submit, EventKind::Change] {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| forward_event(kind, event))
            as Box<dyn FnMut(web_sys::Event)>);
        real_root.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())?;
        // #root vive toda la sesión: un listener por tipo, registrado una vez
        closure.forget();
    }
    Ok(())
}

/// Primer ancestro `[data-vid]` cuyo elemento virtual escucha `kind`
fn find_handler(start: &Element, kind: EventKind) -> Option<(Element, ElementRef)> {
    let document = virtual_document()?;
    let mut current = start.closest("[data-vid]").ok().flatten();
    while let Some(real) = current {
        let target = real
            .get_attribute("data-vid")
            .and_then(|vid| vid.parse::<u64>().ok())
            .and_then(|handle| document.element_by_handle(handle));
        if let Some(target) = target {
            if target.has_listener(kind) {
                return Some((real, target));
            }
        }
        current = real
            .parent_element()
            .and_then(|parent| parent.closest("[data-vid]").ok().flatten());
    }
    None
}

fn forward_event(kind: EventKind, event: web_sys::Event) {
    let Some(start) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Some((real, target)) = find_handler(&start, kind) else {
        return;
    };

    match kind {
        EventKind::Submit => {
            event.prevent_default();
            pull_values(&real, &target);
            target.dispatch(kind);
        }
        EventKind::Change => match real.dyn_ref::<HtmlInputElement>() {
            Some(input) if input.type_() == "file" => forward_files(input, target),
            _ => {
                pull_values(&real, &target);
                target.dispatch(kind);
            }
        },
        EventKind::Click => {
            let outcome = target.dispatch(kind);
            if outcome.default_prevented() {
                event.prevent_default();
            }
        }
    }
}

/// Lee los bytes de los archivos elegidos y los pasa al input virtual
fn forward_files(input: &HtmlInputElement, target: ElementRef) {
    let files: Vec<web_sys::File> = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default();

    spawn_local(async move {
        let mut selected = Vec::with_capacity(files.len());
        for file in files {
            let file = gloo_file::File::from(file);
            match gloo_file::futures::read_as_bytes(&file).await {
                Ok(data) => selected.push(SelectedFile::new(file.name(), file.raw_mime_type(), data)),
                Err(e) => log::error!("❌ [WEB] No se pudo leer {}: {}", file.name(), e),
            }
        }
        target.select_files(selected);
    });
}
