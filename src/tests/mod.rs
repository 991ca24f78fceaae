// Tests de flujo completo: documento en memoria + viewmodels + MockStore

mod support;

mod router_tests;
