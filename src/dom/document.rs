// ============================================================================
// DOCUMENT - DOM en memoria (arena de nodos)
// ============================================================================
// Es la capacidad "document" que reciben views y viewmodels. En el navegador
// el puente de `web.rs` copia el subárbol de #root al DOM real y reenvía
// los eventos reales hacia aquí.
// ============================================================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use crate::dom::events::{Event, EventKind, Listener};
use crate::models::SelectedFile;

/// Índice de la arena + generación del hueco. Un id cuyo nodo se liberó
/// deja de resolver aunque el hueco se reutilice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    fn handle(self) -> u64 {
        (u64::from(self.generation) << 32) | self.index as u64
    }

    fn from_handle(handle: u64) -> Self {
        Self {
            index: (handle & u64::from(u32::MAX)) as usize,
            generation: (handle >> 32) as u32,
        }
    }
}

enum NodeKind {
    Element(ElementData),
    Text(String),
}

struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Estado de controles de formulario (input/select/textarea)
    value: String,
    files: Vec<SelectedFile>,
}

struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

struct Dom {
    slots: Vec<Slot>,
    // Huecos liberados, se reutilizan antes de crecer
    free: Vec<usize>,
    body: NodeId,
}

impl Dom {
    fn new() -> Self {
        let body = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData::new("body")),
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(body),
            }],
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            parent: None,
            children: Vec::new(),
            kind,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Libera el hueco; los ids viejos quedan invalidados por la generación
    fn release(&mut self, id: NodeId) {
        if id == self.body {
            return;
        }
        let Some(slot) = self.slots.get_mut(id.index) else {
            return;
        };
        if slot.generation != id.generation || slot.node.take().is_none() {
            return;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children_of(id) {
            out.push(*child);
            self.descendants(*child, out);
        }
    }

    fn element_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.descendants(id, &mut all);
        all.retain(|n| self.element(*n).is_some());
        all
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for child in &node.children {
                    self.text_content(*child, out);
                }
            }
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Contenido si el elemento tiene exactamente un hijo de texto
    fn single_text(&self, id: NodeId) -> Option<&str> {
        match self.children_of(id) {
            [only] => match &self.node(*only)?.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element(_) => None,
            },
            _ => None,
        }
    }

    fn is_connected(&self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.parent_of(node);
        }
        false
    }

    fn matches(&self, id: NodeId, selector: &Compound) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        if let Some(tag) = &selector.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(wanted) = &selector.id {
            if el.attr("id") != Some(wanted.as_str()) {
                return false;
            }
        }
        if !selector.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        selector.attrs.iter().all(|(name, value)| match value {
            Some(value) => el.attr(name) == Some(value.as_str()),
            None => el.attr(name).is_some(),
        })
    }

    /// Selector con combinador descendiente: el último compuesto casa con el
    /// nodo y los anteriores con algún ancestro, en orden.
    fn matches_chain(&self, id: NodeId, chain: &[Compound], scope: NodeId) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        if !self.matches(id, last) {
            return false;
        }
        let mut remaining = rest;
        let mut current = self.parent_of(id);
        while let Some((wanted, before)) = remaining.split_last() {
            loop {
                let Some(node) = current else {
                    return false;
                };
                current = if node == scope { None } else { self.parent_of(node) };
                if self.matches(node, wanted) {
                    break;
                }
            }
            remaining = before;
        }
        true
    }

    fn write_html(&self, id: NodeId, out: &mut String, handles: Option<&HashSet<NodeId>>) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                if handles.is_some_and(|h| h.contains(&id)) {
                    out.push_str(&format!(" data-vid=\"{}\"", id.handle()));
                }
                out.push('>');
                if is_void(&el.tag) {
                    return;
                }
                if el.tag == "textarea" {
                    out.push_str(&escape_text(&el.value));
                }
                for child in &node.children {
                    self.write_html(*child, out, handles);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            value: String::new(),
            files: Vec::new(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Devuelve true si el valor cambió
    fn set_attr(&mut self, name: &str, value: &str) -> bool {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) if current == value => false,
            Some((_, current)) => {
                *current = value.to_string();
                true
            }
            None => {
                self.attrs.push((name.to_string(), value.to_string()));
                true
            }
        }
    }

    fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(n, _)| n != name);
        before != self.attrs.len()
    }

    fn classes(&self) -> Vec<String> {
        self.attr("class")
            .unwrap_or("")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }
}

/// Selector compuesto: tag#id.clase[attr="valor"]
#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

fn parse_selector(selector: &str) -> Vec<Compound> {
    selector.split_whitespace().map(parse_compound).collect()
}

fn parse_compound(raw: &str) -> Compound {
    let mut compound = Compound::default();
    let mut rest = raw;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let (inner, tail) = after.split_once(']').unwrap_or((after, ""));
            match inner.split_once('=') {
                Some((name, value)) => compound.attrs.push((
                    name.trim().to_string(),
                    Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()),
                )),
                None => compound.attrs.push((inner.trim().to_string(), None)),
            }
            rest = tail;
            continue;
        }
        let (sigil, body) = match rest.chars().next() {
            Some(c @ ('#' | '.')) => (Some(c), &rest[1..]),
            _ => (None, rest),
        };
        let end = body.find(['#', '.', '[']).unwrap_or(body.len());
        let name = body[..end].to_string();
        match sigil {
            Some('#') => compound.id = Some(name),
            Some('.') => compound.classes.push(name),
            _ => compound.tag = Some(name),
        }
        rest = &body[end..];
    }
    compound
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "img" | "br" | "hr" | "meta" | "link")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

type Subscriber = Rc<dyn Fn()>;

/// Documento en memoria. Clonar es barato (Rc compartido).
#[derive(Clone)]
pub struct Document {
    dom: Rc<RefCell<Dom>>,
    listeners: Rc<RefCell<HashMap<(NodeId, EventKind), Vec<Listener>>>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            dom: Rc::new(RefCell::new(Dom::new())),
            listeners: Rc::new(RefCell::new(HashMap::new())),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn body(&self) -> ElementRef {
        let body = self.dom.borrow().body;
        self.wrap(body)
    }

    /// Crear elemento (desconectado hasta hacer append)
    pub fn create_element(&self, tag: &str) -> ElementRef {
        let id = self.dom.borrow_mut().push(NodeKind::Element(ElementData::new(tag)));
        self.wrap(id)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.body().query_selector(&format!("#{}", id))
    }

    pub fn get_by_test_id(&self, test_id: &str) -> Option<ElementRef> {
        self.body().get_by_test_id(test_id)
    }

    pub fn get_all_by_test_id(&self, test_id: &str) -> Vec<ElementRef> {
        self.body().get_all_by_test_id(test_id)
    }

    pub fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        self.body().query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        self.body().query_selector_all(selector)
    }

    /// ¿Aparece el texto en alguna parte del documento?
    pub fn contains_text(&self, needle: &str) -> bool {
        self.body().text_content().contains(needle)
    }

    /// Suscribirse a cambios estructurales del documento
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self) {
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }

    /// Elemento a partir del handle serializado en `data-vid`
    pub fn element_by_handle(&self, handle: u64) -> Option<ElementRef> {
        let id = NodeId::from_handle(handle);
        self.dom.borrow().element(id)?;
        Some(self.wrap(id))
    }

    /// Nodos vivos (conectados o no)
    pub fn node_count(&self) -> usize {
        self.dom.borrow().live_count()
    }

    /// Huecos reservados en la arena, vivos + libres
    pub fn arena_capacity(&self) -> usize {
        self.dom.borrow().slots.len()
    }

    fn wrap(&self, id: NodeId) -> ElementRef {
        ElementRef {
            doc: self.clone(),
            id,
        }
    }

    fn purge_listeners(&self, nodes: &[NodeId]) {
        if nodes.is_empty() {
            return;
        }
        let doomed: HashSet<NodeId> = nodes.iter().copied().collect();
        self.listeners
            .borrow_mut()
            .retain(|(node, _), _| !doomed.contains(node));
    }

    fn nodes_with_listeners(&self) -> HashSet<NodeId> {
        self.listeners.borrow().keys().map(|(node, _)| *node).collect()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document({})", self.body().outer_html())
    }
}

/// Referencia a un elemento del Document
#[derive(Clone)]
pub struct ElementRef {
    doc: Document,
    id: NodeId,
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.doc.dom, &other.doc.dom)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} #{}v{}>", self.tag_name(), self.id.index, self.id.generation)
    }
}

impl ElementRef {
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn handle(&self) -> u64 {
        self.id.handle()
    }

    pub fn tag_name(&self) -> String {
        self.read(|el| el.tag.clone()).unwrap_or_default()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.read(|el| el.attr(name).map(str::to_string)).flatten()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        let changed = self.write(|el| el.set_attr(name, value)).unwrap_or(false);
        if changed {
            self.doc.notify();
        }
    }

    pub fn remove_attr(&self, name: &str) {
        let changed = self.write(|el| el.remove_attr(name)).unwrap_or(false);
        if changed {
            self.doc.notify();
        }
    }

    pub fn test_id(&self) -> Option<String> {
        self.attr("data-testid")
    }

    pub fn class_name(&self) -> String {
        self.attr("class").unwrap_or_default()
    }

    pub fn set_class_name(&self, class: &str) {
        self.set_attr("class", class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.read(|el| el.has_class(class)).unwrap_or(false)
    }

    pub fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes = self.read(ElementData::classes).unwrap_or_default();
        classes.push(class.to_string());
        self.set_class_name(&classes.join(" "));
    }

    pub fn remove_class(&self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let mut classes = self.read(ElementData::classes).unwrap_or_default();
        classes.retain(|c| c != class);
        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_class_name(&classes.join(" "));
        }
    }

    pub fn set_style(&self, style: &str) {
        self.set_attr("style", style);
    }

    /// Texto concatenado de todos los descendientes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.doc.dom.borrow().text_content(self.id, &mut out);
        out
    }

    /// Reemplaza los hijos por un único nodo de texto.
    /// Si el contenido ya es ese texto no se toca nada ni se notifica.
    pub fn set_text(&self, text: &str) {
        let unchanged = {
            let dom = self.doc.dom.borrow();
            if dom.node(self.id).is_none() {
                true
            } else if text.is_empty() {
                dom.children_of(self.id).is_empty()
            } else {
                dom.single_text(self.id) == Some(text)
            }
        };
        if unchanged {
            return;
        }
        if text.is_empty() {
            self.replace_with_nodes(Vec::new());
            return;
        }
        let node = self.doc.dom.borrow_mut().push(NodeKind::Text(text.to_string()));
        self.replace_with_nodes(vec![node]);
    }

    pub fn append_text(&self, text: &str) {
        {
            let mut dom = self.doc.dom.borrow_mut();
            let node = dom.push(NodeKind::Text(text.to_string()));
            dom.attach(self.id, node);
        }
        self.doc.notify();
    }

    pub fn append_child(&self, child: &ElementRef) {
        self.doc.dom.borrow_mut().attach(self.id, child.id);
        self.doc.notify();
    }

    /// Vacía el elemento y monta `child` como único hijo
    pub fn replace_children(&self, child: &ElementRef) {
        self.replace_with_nodes(vec![child.id]);
    }

    pub fn clear_children(&self) {
        self.replace_with_nodes(Vec::new());
    }

    /// Los nodos que salen del árbol se liberan, salvo los que se vuelven a
    /// montar aquí (conservan también sus listeners)
    fn replace_with_nodes(&self, nodes: Vec<NodeId>) {
        let doomed = {
            let mut dom = self.doc.dom.borrow_mut();
            let mut removed = Vec::new();
            dom.descendants(self.id, &mut removed);
            let old_children = dom
                .node_mut(self.id)
                .map(|n| std::mem::take(&mut n.children))
                .unwrap_or_default();
            for child in old_children {
                if let Some(node) = dom.node_mut(child) {
                    node.parent = None;
                }
            }

            let mut kept: Vec<NodeId> = nodes.clone();
            for node in &nodes {
                dom.descendants(*node, &mut kept);
            }
            let kept: HashSet<NodeId> = kept.into_iter().collect();
            let doomed: Vec<NodeId> = removed.into_iter().filter(|n| !kept.contains(n)).collect();
            for node in &doomed {
                dom.release(*node);
            }
            for node in nodes {
                dom.attach(self.id, node);
            }
            doomed
        };
        self.doc.purge_listeners(&doomed);
        self.doc.notify();
    }

    pub fn parent(&self) -> Option<ElementRef> {
        let parent = self.doc.dom.borrow().parent_of(self.id)?;
        Some(self.doc.wrap(parent))
    }

    /// Hijos de tipo elemento
    pub fn children(&self) -> Vec<ElementRef> {
        let dom = self.doc.dom.borrow();
        let ids: Vec<NodeId> = dom
            .children_of(self.id)
            .iter()
            .copied()
            .filter(|c| dom.element(*c).is_some())
            .collect();
        drop(dom);
        ids.into_iter().map(|id| self.doc.wrap(id)).collect()
    }

    pub fn is_connected(&self) -> bool {
        self.doc.dom.borrow().is_connected(self.id)
    }

    pub fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Descendientes que casan con el selector, en orden de documento
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        let chain = parse_selector(selector);
        let dom = self.doc.dom.borrow();
        let found: Vec<NodeId> = dom
            .element_descendants(self.id)
            .into_iter()
            .filter(|node| dom.matches_chain(*node, &chain, self.id))
            .collect();
        drop(dom);
        found.into_iter().map(|id| self.doc.wrap(id)).collect()
    }

    pub fn get_by_test_id(&self, test_id: &str) -> Option<ElementRef> {
        self.query_selector(&format!("[data-testid=\"{}\"]", test_id))
    }

    pub fn get_all_by_test_id(&self, test_id: &str) -> Vec<ElementRef> {
        self.query_selector_all(&format!("[data-testid=\"{}\"]", test_id))
    }

    // ------------------------------------------------------------------
    // Controles de formulario
    // ------------------------------------------------------------------

    pub fn value(&self) -> String {
        self.read(|el| el.value.clone()).unwrap_or_default()
    }

    /// El valor lo posee el control: no dispara re-sync hacia el navegador
    pub fn set_value(&self, value: &str) {
        self.write(|el| el.value = value.to_string());
    }

    pub fn files(&self) -> Vec<SelectedFile> {
        self.read(|el| el.files.clone()).unwrap_or_default()
    }

    /// Igual que el navegador: value = "C:\\fakepath\\<nombre>"
    pub fn set_files(&self, files: Vec<SelectedFile>) {
        self.write(|el| {
            el.value = files
                .first()
                .map(|f| format!("C:\\fakepath\\{}", f.name))
                .unwrap_or_default();
            el.files = files;
        });
    }

    /// Vacía un input file (esto sí se refleja en el navegador)
    pub fn clear_files(&self) {
        self.write(|el| {
            el.value.clear();
            el.files.clear();
        });
        self.doc.notify();
    }

    // ------------------------------------------------------------------
    // Eventos
    // ------------------------------------------------------------------

    pub fn add_event_listener<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.doc
            .listeners
            .borrow_mut()
            .entry((self.id, kind))
            .or_default()
            .push(Rc::new(handler));
    }

    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.doc.listeners.borrow().contains_key(&(self.id, kind))
    }

    /// Despacha el evento a los listeners del elemento (sin burbujeo)
    pub fn dispatch(&self, kind: EventKind) -> Event {
        let event = Event::new(kind, self.clone());
        // Copia de la lista: un handler puede desmontar este mismo elemento
        let handlers: Vec<Listener> = self
            .doc
            .listeners
            .borrow()
            .get(&(self.id, kind))
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler(&event);
        }
        event
    }

    pub fn click(&self) -> Event {
        self.dispatch(EventKind::Click)
    }

    pub fn submit(&self) -> Event {
        self.dispatch(EventKind::Submit)
    }

    pub fn select_files(&self, files: Vec<SelectedFile>) -> Event {
        self.set_files(files);
        self.dispatch(EventKind::Change)
    }

    // ------------------------------------------------------------------
    // Serialización
    // ------------------------------------------------------------------

    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.doc.dom.borrow().write_html(self.id, &mut out, None);
        out
    }

    pub fn inner_html(&self) -> String {
        let dom = self.doc.dom.borrow();
        let mut out = String::new();
        for child in dom.children_of(self.id) {
            dom.write_html(*child, &mut out, None);
        }
        out
    }

    /// inner_html marcando con `data-vid` los nodos que tienen listeners
    pub fn mount_html(&self) -> String {
        let handles = self.doc.nodes_with_listeners();
        let dom = self.doc.dom.borrow();
        let mut out = String::new();
        for child in dom.children_of(self.id) {
            dom.write_html(*child, &mut out, Some(&handles));
        }
        out
    }

    fn read<T>(&self, f: impl FnOnce(&ElementData) -> T) -> Option<T> {
        self.doc.dom.borrow().element(self.id).map(f)
    }

    fn write<T>(&self, f: impl FnOnce(&mut ElementData) -> T) -> Option<T> {
        self.doc.dom.borrow_mut().element_mut(self.id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample(doc: &Document) -> ElementRef {
        let root = doc.create_element("div");
        root.set_attr("id", "root");
        let modal = doc.create_element("div");
        modal.set_attr("id", "modaleFile");
        modal.set_class_name("modal fade");
        let body = doc.create_element("div");
        body.set_class_name("modal-body");
        modal.append_child(&body);
        root.append_child(&modal);
        let input = doc.create_element("input");
        input.set_attr("data-testid", "file");
        input.set_attr("type", "file");
        root.append_child(&input);
        doc.body().append_child(&root);
        root
    }

    #[test]
    fn selectors_by_id_class_attr_and_descendant() {
        let doc = Document::new();
        sample(&doc);
        assert!(doc.get_element_by_id("modaleFile").is_some());
        assert!(doc.query_selector(".modal-body").is_some());
        assert!(doc.query_selector("#modaleFile .modal-body").is_some());
        assert!(doc.query_selector("#root .modal-body").is_some());
        assert!(doc.query_selector("input[data-testid=\"file\"]").is_some());
        assert!(doc.query_selector("input[type=file]").is_some());
        assert!(doc.query_selector("#missing .modal-body").is_none());
        assert!(doc.query_selector("div.modal.fade").is_some());
        assert!(doc.query_selector("div.modal.show").is_none());
    }

    #[test]
    fn detached_elements_are_not_found_from_document() {
        let doc = Document::new();
        let orphan = doc.create_element("div");
        orphan.set_attr("data-testid", "orphan");
        assert!(doc.get_by_test_id("orphan").is_none());
        assert!(!orphan.is_connected());
    }

    #[test]
    fn class_helpers_keep_class_name_exact() {
        let doc = Document::new();
        let icon = doc.create_element("div");
        icon.add_class("active-icon");
        assert_eq!(icon.class_name(), "active-icon");
        icon.add_class("active-icon");
        assert_eq!(icon.class_name(), "active-icon");
        icon.add_class("big");
        icon.remove_class("active-icon");
        assert_eq!(icon.class_name(), "big");
        icon.remove_class("big");
        assert_eq!(icon.attr("class"), None);
    }

    #[test]
    fn html_serialization_escapes_and_skips_void_closing_tags() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_attr("title", "a \"b\"");
        div.set_text("1 < 2 & 3");
        let img = doc.create_element("img");
        img.set_attr("src", "x.png");
        div.append_child(&img);
        assert_eq!(
            div.outer_html(),
            "<div title=\"a &quot;b&quot;\">1 &lt; 2 &amp; 3<img src=\"x.png\"></div>"
        );
    }

    #[test]
    fn mount_html_marks_nodes_with_listeners() {
        let doc = Document::new();
        let root = sample(&doc);
        let input = doc.get_by_test_id("file").unwrap();
        input.add_event_listener(EventKind::Change, |_| {});
        let html = root.mount_html();
        assert!(html.contains(&format!("data-vid=\"{}\"", input.handle())));
        assert_eq!(doc.element_by_handle(input.handle()), Some(input));
    }

    #[test]
    fn subscribers_only_hear_real_changes() {
        let doc = Document::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        doc.subscribe(move || counter.set(counter.get() + 1));
        let div = doc.create_element("div");
        div.set_attr("id", "x");
        div.set_attr("id", "x");
        div.set_value("typed");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn remounted_child_keeps_its_listeners() {
        let doc = Document::new();
        let root = sample(&doc);
        let button = doc.create_element("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        button.add_event_listener(EventKind::Click, move |_| counter.set(counter.get() + 1));
        root.replace_children(&button);
        button.click();
        assert_eq!(hits.get(), 1);
        assert!(doc.get_by_test_id("file").is_none());
    }

    #[test]
    fn set_text_with_the_same_content_is_silent() {
        let doc = Document::new();
        let error = doc.create_element("div");
        doc.body().append_child(&error);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        doc.subscribe(move || counter.set(counter.get() + 1));

        error.set_text("");
        error.set_text("Formato no válido");
        error.set_text("Formato no válido");
        assert_eq!(hits.get(), 1);
        error.set_text("");
        error.set_text("");
        assert_eq!(hits.get(), 2);
        assert_eq!(error.inner_html(), "");
    }

    #[test]
    fn replaced_nodes_free_their_slots() {
        let doc = Document::new();
        let root = sample(&doc);
        let mount = |i: usize| {
            let page = doc.create_element("section");
            page.set_text(&format!("page {}", i));
            root.replace_children(&page);
        };
        mount(0);
        let before = doc.arena_capacity();
        for i in 1..50 {
            mount(i);
        }
        assert_eq!(doc.arena_capacity(), before);
        // body + #root + section + texto
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn stale_handles_do_not_resolve_after_slot_reuse() {
        let doc = Document::new();
        let root = sample(&doc);
        let input = doc.get_by_test_id("file").unwrap();
        input.add_event_listener(EventKind::Change, |_| {});
        let stale = input.handle();

        root.clear_children();
        let fresh = doc.create_element("input");
        root.append_child(&fresh);

        assert!(doc.element_by_handle(stale).is_none());
        assert_ne!(fresh.handle(), stale);
        assert!(!fresh.has_listener(EventKind::Change));
        // La referencia vieja es inerte
        assert!(!input.is_connected());
        assert_eq!(input.tag_name(), "");
        input.set_attr("id", "ghost");
        assert!(doc.get_element_by_id("ghost").is_none());
    }
}
