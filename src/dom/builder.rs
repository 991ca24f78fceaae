// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use crate::dom::{Document, ElementRef};

pub struct ElementBuilder {
    element: ElementRef,
}

impl ElementBuilder {
    /// Crear nuevo builder para un elemento
    pub fn new(doc: &Document, tag: &str) -> Self {
        Self {
            element: doc.create_element(tag),
        }
    }

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    /// Establecer ID
    pub fn id(self, id: &str) -> Self {
        self.element.set_attr("id", id);
        self
    }

    /// Establecer data-testid
    pub fn test_id(self, test_id: &str) -> Self {
        self.element.set_attr("data-testid", test_id);
        self
    }

    /// Establecer atributo
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.element.set_attr(name, value);
        self
    }

    /// Establecer text content
    pub fn text(self, text: &str) -> Self {
        self.element.set_text(text);
        self
    }

    /// Valor inicial de un control de formulario
    pub fn value(self, value: &str) -> Self {
        self.element.set_value(value);
        self
    }

    /// Agregar hijo
    pub fn child(self, child: ElementRef) -> Self {
        self.element.append_child(&child);
        self
    }

    /// Agregar varios hijos
    pub fn children(self, children: impl IntoIterator<Item = ElementRef>) -> Self {
        for child in children {
            self.element.append_child(&child);
        }
        self
    }

    /// Construir y retornar elemento
    pub fn build(self) -> ElementRef {
        self.element
    }
}
