// ============================================================================
// TASK - spawn_local para wasm y para tests nativos
// ============================================================================
// En el navegador delega en wasm_bindgen_futures. Fuera del navegador usa un
// LocalPool por hilo; los tests lo vacían con `run_until_stalled()` (el
// equivalente a esperar al siguiente tick del event loop).
// ============================================================================

use std::future::Future;

#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{run_until_stalled, spawn_local};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::future::Future;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;

    struct Executor {
        pool: RefCell<LocalPool>,
        spawner: LocalSpawner,
    }

    thread_local! {
        // El spawner se crea junto con el pool: una tarea en ejecución puede
        // lanzar otra sin tocar el RefCell del pool.
        static EXECUTOR: Executor = {
            let pool = LocalPool::new();
            let spawner = pool.spawner();
            Executor { pool: RefCell::new(pool), spawner }
        };
    }

    pub fn spawn_local<F>(future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        EXECUTOR.with(|executor| {
            if let Err(e) = executor.spawner.spawn_local(future) {
                log::error!("❌ [TASK] No se pudo lanzar la tarea: {}", e);
            }
        });
    }

    /// Ejecuta todas las tareas listas hasta que ninguna pueda avanzar
    pub fn run_until_stalled() {
        EXECUTOR.with(|executor| executor.pool.borrow_mut().run_until_stalled());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn spawned_tasks_run_when_pool_is_drained() {
        let hits = Rc::new(Cell::new(0));
        let inner_hits = hits.clone();
        spawn_local(async move {
            inner_hits.set(inner_hits.get() + 1);
            let nested = inner_hits.clone();
            spawn_local(async move { nested.set(nested.get() + 10) });
        });
        assert_eq!(hits.get(), 0);
        run_until_stalled();
        assert_eq!(hits.get(), 11);
    }
}
